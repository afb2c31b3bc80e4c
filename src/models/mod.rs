//! Response schemas
//!
//! Plain serde mirrors of the hacker API's JSON documents. Every field has a
//! default so partial documents decode; unknown fields are ignored.

mod program;
mod weakness;

pub use program::{
    ProgramAttributes, ProgramDetail, ProgramList, Relationships, ScopeAttributes, ScopeData,
    StructuredScopes,
};
pub use weakness::{Weakness, WeaknessAttributes, Weaknesses};


/// Decode `null` as the type's default, the way a missing field is treated
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
