use doku::Document;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Document, Serialize, TypedBuilder)]
#[serde(default)]
pub struct Storage {
    /// Storage bucket where applicants' photos are uploaded to.
    ///
    /// The bucket must be public so the uploaded photo can be
    /// linked from the applicant's record.
    ///
    /// The default value is `photos` if not set.
    #[builder(default = Storage::default().photos_bucket, setter(into))]
    #[doku(example = "photos")]
    pub photos_bucket: String,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            photos_bucket: String::from("photos"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Document, Serialize, TypedBuilder)]
#[serde(default)]
pub struct Records {
    /// Table holding one row per signed up user. Submitted applications
    /// are written to the row of the signed in applicant and the
    /// row's `role` column is used to resolve their role.
    ///
    /// The default value is `users` if not set.
    #[builder(default = Records::default().table, setter(into))]
    #[doku(example = "users")]
    pub table: String,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            table: String::from("users"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Document, Serialize, TypedBuilder)]
#[serde(default)]
pub struct MinorConsent {
    /// Link to the consent form a parent or legal guardian has to sign
    /// for applicants under 18 years old.
    #[builder(setter(into))]
    #[doku(example = "https://example.com/consent")]
    pub form_url: String,

    /// Where applicants under 18 years old continue their application
    /// after the consent form is signed.
    ///
    /// The default value is `/minor-recruitment` if not set.
    #[builder(default = MinorConsent::default().recruitment_path, setter(into))]
    #[doku(example = "/minor-recruitment")]
    pub recruitment_path: String,
}

impl Default for MinorConsent {
    fn default() -> Self {
        Self {
            form_url: String::from(
                "https://na4.documents.adobe.com/public/esignWidget?wid=CBFCIBAA3AAABLblqZhCg2181RCPfiGFpIaJLaS-BatNww51WnL9ot-nG0MvM1uc4x-sER1bMcVj3JTVD3Qg*",
            ),
            recruitment_path: String::from("/minor-recruitment"),
        }
    }
}
