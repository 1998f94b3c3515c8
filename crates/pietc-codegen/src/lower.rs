//! Graph lowering: one basic block per program state.
//!
//! The entry block materializes the stack record and buffer and declares
//! the C runtime I/O functions, then branches to the block for state 0.
//! Each state block inlines its command's stack operations and transfers
//! control: terminal states return 0, single transitions branch
//! unconditionally, and branching states (Pointer, Switch) pop a value,
//! reduce it modulo the edge count, and dispatch through a switch.

use inkwell::basic_block::BasicBlock;
use inkwell::module::Linkage;
use inkwell::values::{BasicMetadataValueEnum, FunctionValue, IntValue, PointerValue};
use inkwell::IntPredicate;

use pietc_core::{Command, StateGraph, StateNode};

use crate::context::CodegenContext;
use crate::error::CodegenError;
use crate::stack::{emit_pop, emit_push, emit_roll};

/// Number of `i32` slots in the stack buffer.
pub const STACK_CAPACITY: u32 = 1024;

/// External C functions the emitted program calls for I/O, plus the shared
/// `"%d"` format string used by numeric input and output.
struct Runtime<'ctx> {
    printf: FunctionValue<'ctx>,
    scanf: FunctionValue<'ctx>,
    getchar: FunctionValue<'ctx>,
    putchar: FunctionValue<'ctx>,
    fmt: PointerValue<'ctx>,
}

impl<'ctx> Runtime<'ctx> {
    fn declare(cg: &CodegenContext<'ctx>) -> Result<Runtime<'ctx>, CodegenError> {
        let i32_ty = cg.i32_type();
        let ptr_ty = cg.ptr_type();
        let vararg_ty = i32_ty.fn_type(&[ptr_ty.into()], true);

        let printf = cg.module().add_function("printf", vararg_ty, None);
        let scanf = cg.module().add_function("__isoc99_scanf", vararg_ty, None);
        let getchar = cg
            .module()
            .add_function("getchar", i32_ty.fn_type(&[], false), None);
        let putchar = cg
            .module()
            .add_function("putchar", i32_ty.fn_type(&[i32_ty.into()], false), None);

        let fmt_init = cg.llvm_context().const_string(b"%d", true);
        let fmt = cg.module().add_global(fmt_init.get_type(), None, ".str");
        fmt.set_initializer(&fmt_init);
        fmt.set_linkage(Linkage::Private);
        fmt.set_constant(true);

        let zero = i32_ty.const_zero();
        let fmt_ptr = unsafe {
            cg.builder()
                .build_in_bounds_gep(fmt.as_pointer_value(), &[zero, zero], "fmt_ptr")?
        };

        Ok(Runtime {
            printf,
            scanf,
            getchar,
            putchar,
            fmt: fmt_ptr,
        })
    }
}

/// Lower `graph` into the context's module as `i32 @main()`.
pub(crate) fn lower_graph<'ctx>(
    cg: &CodegenContext<'ctx>,
    graph: &StateGraph,
) -> Result<(), CodegenError> {
    let ctx = cg.llvm_context();
    let b = cg.builder();
    let i32_ty = cg.i32_type();
    let zero = i32_ty.const_zero();

    let main_fn = cg
        .module()
        .add_function("main", i32_ty.fn_type(&[], false), None);
    let entry = ctx.append_basic_block(main_fn, "entry");
    b.position_at_end(entry);

    // Materialize the stack record: fixed-capacity buffer, size 0.
    let stack = b.build_alloca(cg.stack_type(), "stack")?;
    let buf_array_ty = i32_ty.array_type(STACK_CAPACITY);
    let buf = b.build_alloca(buf_array_ty, "stackbuf")?;
    let buf_ptr = unsafe { b.build_in_bounds_gep(buf, &[zero, zero], "buf_ptr")? };
    let field_buf = b.build_struct_gep(stack, 0, "stack_buf_ptr")?;
    b.build_store(field_buf, buf_ptr)?;
    let field_size = b.build_struct_gep(stack, 1, "stack_size_ptr")?;
    b.build_store(field_size, zero)?;
    let field_cap = b.build_struct_gep(stack, 2, "stack_cap_ptr")?;
    b.build_store(field_cap, i32_ty.const_int(STACK_CAPACITY as u64, false))?;

    let runtime = Runtime::declare(cg)?;

    // An unstartable program has no states; it just returns 0.
    if graph.is_empty() {
        b.build_return(Some(&zero))?;
        return Ok(());
    }

    let state_blocks: Vec<BasicBlock<'ctx>> = (0..graph.len())
        .map(|i| ctx.append_basic_block(main_fn, &format!("node{i}")))
        .collect();
    b.build_unconditional_branch(state_blocks[0])?;

    for node in graph.nodes() {
        b.position_at_end(state_blocks[node.id]);
        match node.transitions.as_slice() {
            [] => {
                b.build_return(Some(&zero))?;
            }
            [edge] => {
                emit_command(cg, main_fn, &runtime, stack, node, edge.command)?;
                b.build_unconditional_branch(state_blocks[edge.target])?;
            }
            edges => {
                // Pointer/Switch: the popped value selects the successor.
                let choice = emit_pop(cg, stack)?;
                let edge_count = i32_ty.const_int(edges.len() as u64, false);
                let index = b.build_int_unsigned_rem(choice, edge_count, "choice_index")?;
                let cases: Vec<(IntValue<'ctx>, BasicBlock<'ctx>)> = edges
                    .iter()
                    .enumerate()
                    .map(|(j, e)| (i32_ty.const_int(j as u64, false), state_blocks[e.target]))
                    .collect();
                b.build_switch(index, state_blocks[edges[0].target], &cases)?;
            }
        }
    }

    Ok(())
}

/// Inline the stack operations of a single command.
///
/// Binary arithmetic pops `a` then `b` and computes `b op a`, so the value
/// pushed earlier is the left operand of non-commutative operators.
fn emit_command<'ctx>(
    cg: &CodegenContext<'ctx>,
    function: FunctionValue<'ctx>,
    runtime: &Runtime<'ctx>,
    stack: PointerValue<'ctx>,
    node: &StateNode,
    command: Command,
) -> Result<(), CodegenError> {
    let b = cg.builder();
    let i32_ty = cg.i32_type();
    let zero = i32_ty.const_zero();
    let one = i32_ty.const_int(1, false);

    match command {
        // Pointer and Switch never reach here: they always fan out to
        // multiple transitions and are handled by the switch dispatch.
        Command::None | Command::Pointer | Command::Switch => {}
        Command::Push => {
            let size = i32_ty.const_int(node.block_size as u64, false);
            emit_push(cg, stack, size)?;
        }
        Command::Pop => {
            emit_pop(cg, stack)?;
        }
        Command::Add => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let sum = b.build_int_add(b_val, a, "sum")?;
            emit_push(cg, stack, sum)?;
        }
        Command::Subtract => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let diff = b.build_int_sub(b_val, a, "diff")?;
            emit_push(cg, stack, diff)?;
        }
        Command::Multiply => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let prod = b.build_int_mul(b_val, a, "prod")?;
            emit_push(cg, stack, prod)?;
        }
        Command::Divide => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let quot = b.build_int_signed_div(b_val, a, "quot")?;
            emit_push(cg, stack, quot)?;
        }
        Command::Modulo => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let rem = b.build_int_signed_rem(b_val, a, "rem")?;
            emit_push(cg, stack, rem)?;
        }
        Command::Not => {
            let a = emit_pop(cg, stack)?;
            let is_zero = b.build_int_compare(IntPredicate::EQ, a, zero, "is_zero")?;
            let result = b
                .build_select(is_zero, one, zero, "not_result")?
                .into_int_value();
            emit_push(cg, stack, result)?;
        }
        Command::Greater => {
            let a = emit_pop(cg, stack)?;
            let b_val = emit_pop(cg, stack)?;
            let gt = b.build_int_compare(IntPredicate::SGT, b_val, a, "gt_cmp")?;
            let result = b.build_select(gt, one, zero, "gt_result")?.into_int_value();
            emit_push(cg, stack, result)?;
        }
        Command::Duplicate => {
            let value = emit_pop(cg, stack)?;
            emit_push(cg, stack, value)?;
            emit_push(cg, stack, value)?;
        }
        Command::Roll => {
            let rolls = emit_pop(cg, stack)?;
            let depth = emit_pop(cg, stack)?;
            emit_roll(cg, function, stack, rolls, depth)?;
        }
        Command::InputNum => {
            let slot = b.build_alloca(i32_ty, "input_num")?;
            b.build_call(
                runtime.scanf,
                &[runtime.fmt.into(), slot.into()],
                "scanned",
            )?;
            let value = b.build_load(slot, "input_val")?.into_int_value();
            emit_push(cg, stack, value)?;
        }
        Command::InputChar => {
            let value = call_int(cg, runtime.getchar, &[], "input_char")?;
            emit_push(cg, stack, value)?;
        }
        Command::OutputNum => {
            let value = emit_pop(cg, stack)?;
            b.build_call(
                runtime.printf,
                &[runtime.fmt.into(), value.into()],
                "printed",
            )?;
        }
        Command::OutputChar => {
            let value = emit_pop(cg, stack)?;
            b.build_call(runtime.putchar, &[value.into()], "put")?;
        }
    }
    Ok(())
}

/// Call a function that returns an `i32` and yield the result.
fn call_int<'ctx>(
    cg: &CodegenContext<'ctx>,
    function: FunctionValue<'ctx>,
    args: &[BasicMetadataValueEnum<'ctx>],
    name: &str,
) -> Result<IntValue<'ctx>, CodegenError> {
    let site = cg.builder().build_call(function, args, name)?;
    site.try_as_basic_value()
        .left()
        .map(|v| v.into_int_value())
        .ok_or_else(|| CodegenError::VoidCall {
            name: function.get_name().to_string_lossy().into_owned(),
        })
}
