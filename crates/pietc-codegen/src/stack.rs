//! Inline IR templates for the runtime stack.
//!
//! The stack lives in the generated function as a `{ ptr, i32, i32 }`
//! record (buffer, size, capacity). Push, pop, and roll are emitted inline
//! at every use site; no runtime library is linked. Pop does not guard
//! against underflow: popping an empty stack is undefined in the emitted
//! code, and well-formed programs never do it.

use inkwell::values::{FunctionValue, IntValue, PointerValue};
use inkwell::IntPredicate;

use crate::context::CodegenContext;
use crate::error::CodegenError;

/// Emit `push(value)`: store at `buffer[size]`, then increment `size`.
pub(crate) fn emit_push<'ctx>(
    cg: &CodegenContext<'ctx>,
    stack: PointerValue<'ctx>,
    value: IntValue<'ctx>,
) -> Result<(), CodegenError> {
    let b = cg.builder();
    let i32_ty = cg.i32_type();

    let size_ptr = b.build_struct_gep(stack, 1, "size_ptr")?;
    let size = b.build_load(size_ptr, "size")?.into_int_value();
    let buf_ptr_ptr = b.build_struct_gep(stack, 0, "buf_ptr_ptr")?;
    let buf = b
        .build_load(buf_ptr_ptr, "buf")?
        .into_pointer_value();

    let dest = unsafe { b.build_in_bounds_gep(buf, &[size], "dest_ptr")? };
    b.build_store(dest, value)?;

    let new_size = b.build_int_add(size, i32_ty.const_int(1, false), "new_size")?;
    b.build_store(size_ptr, new_size)?;
    Ok(())
}

/// Emit `pop()`: decrement `size` and yield `buffer[size - 1]`.
pub(crate) fn emit_pop<'ctx>(
    cg: &CodegenContext<'ctx>,
    stack: PointerValue<'ctx>,
) -> Result<IntValue<'ctx>, CodegenError> {
    let b = cg.builder();
    let i32_ty = cg.i32_type();

    let size_ptr = b.build_struct_gep(stack, 1, "size_ptr")?;
    let size = b.build_load(size_ptr, "size")?.into_int_value();
    let new_size = b.build_int_sub(size, i32_ty.const_int(1, false), "new_size")?;
    b.build_store(size_ptr, new_size)?;

    let buf_ptr_ptr = b.build_struct_gep(stack, 0, "buf_ptr_ptr")?;
    let buf = b
        .build_load(buf_ptr_ptr, "buf")?
        .into_pointer_value();
    let elem_ptr = unsafe { b.build_in_bounds_gep(buf, &[new_size], "elem_ptr")? };
    Ok(b.build_load(elem_ptr, "popped")?.into_int_value())
}

/// Emit `roll(rolls, depth)`: rotate the top `depth` stack values upward
/// by `rolls` positions.
///
/// The emitted control flow checks `0 < depth <= size`, normalizes the
/// count into `0..depth` (so negative counts rotate the other way), copies
/// the top `depth` values into a temporary buffer, and writes each element
/// `i` back to `start + ((i + count) mod depth)`. Invalid depths and a
/// zero count fall straight through to `roll_end`.
pub(crate) fn emit_roll<'ctx>(
    cg: &CodegenContext<'ctx>,
    function: FunctionValue<'ctx>,
    stack: PointerValue<'ctx>,
    rolls: IntValue<'ctx>,
    depth: IntValue<'ctx>,
) -> Result<(), CodegenError> {
    let b = cg.builder();
    let ctx = cg.llvm_context();
    let i32_ty = cg.i32_type();
    let zero = i32_ty.const_zero();
    let one = i32_ty.const_int(1, false);

    let size_ptr = b.build_struct_gep(stack, 1, "size_ptr")?;
    let size = b.build_load(size_ptr, "size")?.into_int_value();

    let depth_le_zero = b.build_int_compare(IntPredicate::SLE, depth, zero, "depth_le_zero")?;
    let depth_gt_size = b.build_int_compare(IntPredicate::SGT, depth, size, "depth_gt_size")?;
    let invalid_depth = b.build_or(depth_le_zero, depth_gt_size, "invalid_depth")?;

    let cont_bb = ctx.append_basic_block(function, "roll_cont");
    let end_bb = ctx.append_basic_block(function, "roll_end");
    b.build_conditional_branch(invalid_depth, end_bb, cont_bb)?;

    b.position_at_end(cont_bb);
    // The buffer pointer is loop-invariant; load it once.
    let buf_ptr_ptr = b.build_struct_gep(stack, 0, "roll_buf_ptr_ptr")?;
    let buf = b
        .build_load(buf_ptr_ptr, "roll_buf")?
        .into_pointer_value();

    // count = ((rolls % depth) + depth) % depth, via a select on the sign.
    let rem = b.build_int_signed_rem(rolls, depth, "rolls_rem")?;
    let rem_neg = b.build_int_compare(IntPredicate::SLT, rem, zero, "rem_neg")?;
    let rem_wrapped = b.build_int_add(rem, depth, "rem_wrapped")?;
    let count = b
        .build_select(rem_neg, rem_wrapped, rem, "roll_count")?
        .into_int_value();

    let count_zero = b.build_int_compare(IntPredicate::EQ, count, zero, "count_zero")?;
    let noop_bb = ctx.append_basic_block(function, "roll_noop");
    let rotate_bb = ctx.append_basic_block(function, "roll_rotate");
    b.build_conditional_branch(count_zero, noop_bb, rotate_bb)?;

    b.position_at_end(noop_bb);
    b.build_unconditional_branch(end_bb)?;

    b.position_at_end(rotate_bb);
    let start = b.build_int_sub(size, depth, "roll_start")?;
    let temp = b.build_array_alloca(i32_ty, depth, "roll_tmp")?;

    // Copy the top `depth` elements out to the temporary buffer.
    let copy_idx = b.build_alloca(i32_ty, "copy_idx")?;
    b.build_store(copy_idx, zero)?;
    let copy_head_bb = ctx.append_basic_block(function, "copy_head");
    let copy_body_bb = ctx.append_basic_block(function, "copy_body");
    let copy_done_bb = ctx.append_basic_block(function, "copy_done");
    b.build_unconditional_branch(copy_head_bb)?;

    b.position_at_end(copy_head_bb);
    let idx = b.build_load(copy_idx, "idx")?.into_int_value();
    let more = b.build_int_compare(IntPredicate::SLT, idx, depth, "copy_more")?;
    b.build_conditional_branch(more, copy_body_bb, copy_done_bb)?;

    b.position_at_end(copy_body_bb);
    let src_idx = b.build_int_add(start, idx, "src_idx")?;
    let src_ptr = unsafe { b.build_in_bounds_gep(buf, &[src_idx], "src_ptr")? };
    let elem = b.build_load(src_ptr, "elem")?;
    let tmp_ptr = unsafe { b.build_in_bounds_gep(temp, &[idx], "tmp_ptr")? };
    b.build_store(tmp_ptr, elem)?;
    let idx_next = b.build_int_add(idx, one, "idx_next")?;
    b.build_store(copy_idx, idx_next)?;
    b.build_unconditional_branch(copy_head_bb)?;

    // Write each element back to its rotated position.
    b.position_at_end(copy_done_bb);
    let back_idx = b.build_alloca(i32_ty, "back_idx")?;
    b.build_store(back_idx, zero)?;
    let back_head_bb = ctx.append_basic_block(function, "back_head");
    let back_body_bb = ctx.append_basic_block(function, "back_body");
    let back_done_bb = ctx.append_basic_block(function, "back_done");
    b.build_unconditional_branch(back_head_bb)?;

    b.position_at_end(back_head_bb);
    let bidx = b.build_load(back_idx, "bidx")?.into_int_value();
    let back_more = b.build_int_compare(IntPredicate::SLT, bidx, depth, "back_more")?;
    b.build_conditional_branch(back_more, back_body_bb, back_done_bb)?;

    b.position_at_end(back_body_bb);
    let shifted = b.build_int_add(bidx, count, "shifted")?;
    let new_pos = b.build_int_signed_rem(shifted, depth, "new_pos")?;
    let dest_idx = b.build_int_add(start, new_pos, "dest_idx")?;
    let dest_ptr = unsafe { b.build_in_bounds_gep(buf, &[dest_idx], "dest_ptr")? };
    let tmp_src = unsafe { b.build_in_bounds_gep(temp, &[bidx], "tmp_src")? };
    let tmp_val = b.build_load(tmp_src, "tmp_val")?;
    b.build_store(dest_ptr, tmp_val)?;
    let bidx_next = b.build_int_add(bidx, one, "bidx_next")?;
    b.build_store(back_idx, bidx_next)?;
    b.build_unconditional_branch(back_head_bb)?;

    b.position_at_end(back_done_bb);
    b.build_unconditional_branch(end_bb)?;

    b.position_at_end(end_bb);
    Ok(())
}
