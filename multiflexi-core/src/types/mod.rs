//! 类型定义模块

mod item;
mod kind;
mod records;
mod status;

pub use item::{decode_rows, Field, Item, INTERVAL_CODES};
pub use kind::EntityKind;
pub use records::{
    Application, Artifact, Company, CompanyApp, CrPrototype, CredType, Credential, Job, QueueEntry,
    RunTemplate, Token, User,
};
pub use status::{CommandInfo, StatusInfo};
