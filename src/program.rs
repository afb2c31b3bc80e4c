//! Per-program handle
//!
//! A [`Program`] is either built from a handle with
//! [`Hackerone::program`](crate::Hackerone::program) or yielded by the
//! program list. Either way it owns a session clone and can fetch its own
//! detail and weaknesses.

use crate::error::Result;
use crate::hackerone::Hackerone;
use crate::models::{ProgramAttributes, ProgramDetail, Weaknesses};
use serde::Serialize;
use std::fmt;

/// A program the user can report to
#[derive(Clone, Serialize)]
pub struct Program {
    #[serde(skip)]
    session: Hackerone,

    /// Handle used in endpoint paths; serialized through `attributes`
    #[serde(skip)]
    pub handle: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Attributes from the program list; only the handle for handle-only programs
    #[serde(flatten)]
    pub attributes: ProgramAttributes,
}

impl Program {
    pub(crate) fn new(session: Hackerone, handle: impl Into<String>) -> Self {
        let handle = handle.into();
        Self {
            session,
            attributes: ProgramAttributes {
                handle: handle.clone(),
                ..ProgramAttributes::default()
            },
            handle,
            id: String::new(),
            kind: String::new(),
        }
    }

    pub(crate) fn from_detail(session: Hackerone, detail: ProgramDetail) -> Self {
        Self {
            session,
            handle: detail.attributes.handle.clone(),
            id: detail.id,
            kind: detail.kind,
            attributes: detail.attributes,
        }
    }

    /// Identifier used to address the program
    pub fn id(&self) -> &str {
        &self.handle
    }

    /// Session this program makes its calls with
    pub fn session(&self) -> &Hackerone {
        &self.session
    }

    /// Fetch the full program record, including structured scopes
    pub async fn detail(&self) -> Result<ProgramDetail> {
        let url = self
            .session
            .endpoint_url(&["hackers", "programs", self.handle.as_str()])?;
        let page = self
            .session
            .walker()
            .single_page(&url, &format!("program {}", self.handle))
            .await?;

        page.decode("program detail")
    }

    /// Fetch the weaknesses the program accepts
    pub async fn weaknesses(&self) -> Result<Weaknesses> {
        let url = self
            .session
            .endpoint_url(&["hackers", "programs", self.handle.as_str(), "weaknesses"])?;
        let page = self
            .session
            .walker()
            .single_page(&url, &format!("weaknesses of {}", self.handle))
            .await?;

        page.decode("weaknesses")
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
