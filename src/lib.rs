//! Mirror one year of the NOAA/NCEI GPCP precipitation archive onto a local
//! data tree.
//!
//! [`mirror::Mirror`] lists the remote year through a [`listing::RemoteIndex`],
//! downloads files missing locally through a [`listing::FileFetcher`], then
//! moves superseded same-day files aside with [`reconcile::reconcile`].
//! [`ncei::NceiHttpClient`] implements both seams over blocking HTTP.

pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod listing;
pub mod mirror;
pub mod ncei;
pub mod output;
pub mod reconcile;
