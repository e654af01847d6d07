//! Domain records returned by the alumni API.
//!
//! The list controller treats these as opaque; they only expose a key
//! through [`Entity`](crate::Entity) and the fields filters look at through
//! [`Filterable`](crate::list::Filterable).

mod group;
mod job;
mod member;
mod profile;

pub use group::{Group, MembershipDecision, NewGroup};
pub use job::{Application, ApplicationForm, ApplicationStatus, Attachment, Job, JobType, NewJob};
pub use member::Member;
pub use profile::{Profile, ProfileUpdate};
