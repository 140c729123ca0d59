use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::types::ApplicationStatus;

#[derive(Debug, Clone, Serialize, TypedBuilder)]
pub struct UpdateApplicationStatusForm<'a> {
    pub status: ApplicationStatus,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<&'a str>,
}
