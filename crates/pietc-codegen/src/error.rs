//! Codegen errors.

use thiserror::Error;

/// Errors that can occur while lowering a state graph to LLVM IR.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("LLVM builder error: {0}")]
    Builder(#[from] inkwell::builder::BuilderError),

    #[error("call to {name} produced no value")]
    VoidCall { name: String },
}
