use obscura_schema::types::{Identity, Role};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::{IdentityService, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    /// The identity lookup has not completed yet.
    Checking,
    SignedOut,
    SignedIn { identity: Identity, role: Role },
}

impl ShellState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn { identity, .. } => Some(identity),
            _ => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::SignedIn { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Keeps track of who is signed in and with which role.
///
/// The resolved role is cached for as long as the same user stays
/// signed in.
pub struct Session {
    identity: Arc<dyn IdentityService>,
    records: Arc<dyn RecordStore>,
    table: String,
    cached_role: Option<(Uuid, Role)>,
    state: ShellState,
}

impl Session {
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityService>,
        records: Arc<dyn RecordStore>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            records,
            table: table.into(),
            cached_role: None,
            state: ShellState::Checking,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    #[must_use]
    pub fn cached_role(&self) -> Option<Role> {
        self.cached_role.map(|(_, role)| role)
    }

    /// Looks up the current identity. A failing lookup is treated
    /// the same as being signed out.
    #[tracing::instrument(skip_all)]
    pub async fn bootstrap(&mut self) -> &ShellState {
        self.state = ShellState::Checking;
        let identity = match self.identity.current_identity().await {
            Ok(identity) => identity,
            Err(error) => {
                warn!(?error, "could not resolve the current identity");
                None
            }
        };
        self.apply_change(identity).await
    }

    pub async fn apply_change(&mut self, identity: Option<Identity>) -> &ShellState {
        self.state = match identity {
            Some(identity) => {
                let role = self.resolve_role(&identity).await;
                info!(user.id = %identity.id, %role, "signed in");
                ShellState::SignedIn { identity, role }
            }
            None => {
                if self.cached_role.take().is_some() {
                    info!("signed out");
                }
                ShellState::SignedOut
            }
        };
        &self.state
    }

    /// Applies every identity change until the sender goes away.
    pub async fn watch(&mut self, mut changes: watch::Receiver<Option<Identity>>) {
        while changes.changed().await.is_ok() {
            let identity = changes.borrow_and_update().clone();
            self.apply_change(identity).await;
        }
        debug!("identity changes closed");
    }

    /// Resolves the role in this order: the cached role, the role in
    /// the identity's metadata, the `role` column of the identity's
    /// row and finally [`Role::User`].
    ///
    /// The cached role only counts if it belongs to the same user.
    async fn resolve_role(&mut self, identity: &Identity) -> Role {
        match self.cached_role {
            Some((id, role)) if id == identity.id => return role,
            Some(..) => debug!(user.id = %identity.id, "signed in as another user; resolving role again"),
            None => {}
        }

        let role = match identity.metadata.role {
            Some(role) => role,
            None => match self.records.fetch_role(&self.table, identity.id).await {
                Ok(role) => role.unwrap_or_default(),
                Err(error) => {
                    warn!(?error, user.id = %identity.id, "could not fetch role; assuming user");
                    Role::User
                }
            },
        };

        self.cached_role = Some((identity.id, role));
        role
    }
}
