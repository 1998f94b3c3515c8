//! LLVM IR lowering for the Piet compiler.
//!
//! Turns a [`StateGraph`] into a self-contained LLVM module: a single
//! `i32 @main()` with one basic block per program state, an inline
//! fixed-capacity stack, and external declarations for the C I/O
//! functions the program calls. The module is verified after lowering; a
//! verification failure signals a compiler bug and is carried alongside
//! the printed IR rather than suppressing the output.

mod context;
mod error;
mod lower;
mod stack;

use inkwell::context::Context;

use pietc_core::StateGraph;

pub use context::CodegenContext;
pub use error::CodegenError;
pub use lower::STACK_CAPACITY;

/// The result of lowering: textual LLVM IR plus the verifier's verdict.
#[derive(Debug, Clone)]
pub struct EmittedModule {
    /// The module printed as textual IR.
    pub ir: String,
    /// `Some` when `Module::verify` failed, with the verifier's message.
    pub verify_error: Option<String>,
}

/// Lower a state graph to LLVM IR.
///
/// An empty graph (unstartable program) lowers to a `main` that
/// immediately returns 0.
pub fn emit(graph: &StateGraph) -> Result<EmittedModule, CodegenError> {
    let context = Context::create();
    let cg = CodegenContext::new(&context, "piet");
    lower::lower_graph(&cg, graph)?;

    let verify_error = cg.module().verify().err().map(|e| e.to_string());
    Ok(EmittedModule {
        ir: cg.module().print_to_string().to_string(),
        verify_error,
    })
}
