//! Targets shipped with the crate.

mod okhttp;
mod rapidql;

pub use okhttp::OkHttp;
pub use rapidql::RapidQl;

use super::{Client, Target, TargetInfo};

pub fn builtin_targets() -> Vec<Target> {
    vec![
        Target::new(TargetInfo::new("java", "Java", ".java", "okhttp"))
            .with_client(Client::new(OkHttp::info(), OkHttp)),
        Target::new(TargetInfo::new("rapidql", "RapidQL", ".js", "rapidql"))
            .with_client(Client::new(RapidQl::info(), RapidQl)),
    ]
}
