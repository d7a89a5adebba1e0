use anyhow::{Result, anyhow};
use bpaf::Bpaf;
use inkwell_sdk::router::resolve;

use crate::utils::message;

#[derive(Bpaf, Clone, Debug)]
pub struct Route {
    /// Path to resolve, e.g. '/admin/users'
    #[bpaf(positional("path"))]
    path: String,
}

impl Route {
    pub fn handle(self) -> Result<()> {
        let resolved =
            resolve(&self.path).ok_or_else(|| anyhow!("No view for path '{}'", self.path))?;
        message::json(&resolved)
    }
}
