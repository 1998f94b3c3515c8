//! LLVM code generation context wrapping inkwell Context/Module/Builder.

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::types::{IntType, PointerType, StructType};
use inkwell::AddressSpace;

/// Code generation context holding LLVM state shared by all emission
/// helpers: the module, the instruction builder, and the runtime stack's
/// record type `%Stack = { ptr, i32, i32 }` (buffer, size, capacity).
pub struct CodegenContext<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    stack_type: StructType<'ctx>,
}

impl<'ctx> CodegenContext<'ctx> {
    /// Create a new codegen context with an empty module.
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();
        let stack_type = context.opaque_struct_type("Stack");
        stack_type.set_body(
            &[
                context.i32_type().ptr_type(AddressSpace::default()).into(),
                context.i32_type().into(),
                context.i32_type().into(),
            ],
            false,
        );
        Self {
            context,
            module,
            builder,
            stack_type,
        }
    }

    /// Access the LLVM module.
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Access the IR builder.
    pub fn builder(&self) -> &Builder<'ctx> {
        &self.builder
    }

    /// Access the LLVM context.
    pub fn llvm_context(&self) -> &'ctx Context {
        self.context
    }

    /// The 32-bit integer type every stack cell uses.
    pub fn i32_type(&self) -> IntType<'ctx> {
        self.context.i32_type()
    }

    /// The (opaque) pointer type.
    pub fn ptr_type(&self) -> PointerType<'ctx> {
        self.context.i8_type().ptr_type(AddressSpace::default())
    }

    /// The runtime stack record type.
    pub fn stack_type(&self) -> StructType<'ctx> {
        self.stack_type
    }
}
