//! Four dot products sharing one LHS inside a single streaming-mode bracket

use crate::region::BLOCK_FAN_OUT;
use std::arch::asm;

/// SME implementation of four dot products against a shared `a`
///
/// Each LHS vector is loaded once per iteration and multiplied into four
/// accumulators (z0..z3), so the streaming-mode switch is paid once for
/// four results.
///
/// # Safety
/// The CPU must implement SME, and `a` and every pointer in `rhs` must be
/// valid for reads of `n` elements for the whole call.
#[inline(never)]
pub unsafe fn group_dot_sme(
    a: *const f32,
    rhs: [*const f32; BLOCK_FAN_OUT],
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    let [b0, b1, b2, b3] = rhs;
    let (s0, s1, s2, s3): (u32, u32, u32, u32);
    asm!(
        ".arch_extension sve",
        ".arch_extension sme",
        "smstart sm",
        "mov {i}, #0",
        "dup z0.s, #0",
        "dup z1.s, #0",
        "dup z2.s, #0",
        "dup z3.s, #0",
        "ptrue p0.s",
        "whilelt p1.s, {i}, {n}",
        "b.eq 2f",
        "1:",
        "ld1w {{z4.s}}, p1/z, [{a}, {i}, lsl #2]",
        "ld1w {{z5.s}}, p1/z, [{b0}, {i}, lsl #2]",
        "ld1w {{z6.s}}, p1/z, [{b1}, {i}, lsl #2]",
        "ld1w {{z7.s}}, p1/z, [{b2}, {i}, lsl #2]",
        "ld1w {{z16.s}}, p1/z, [{b3}, {i}, lsl #2]",
        "fmla z0.s, p1/m, z4.s, z5.s",
        "fmla z1.s, p1/m, z4.s, z6.s",
        "fmla z2.s, p1/m, z4.s, z7.s",
        "fmla z3.s, p1/m, z4.s, z16.s",
        "incw {i}",
        "whilelt p1.s, {i}, {n}",
        "b.mi 1b",
        "2:",
        "faddv s0, p0, z0.s",
        "faddv s1, p0, z1.s",
        "faddv s2, p0, z2.s",
        "faddv s3, p0, z3.s",
        "fmov {o0:w}, s0",
        "fmov {o1:w}, s1",
        "fmov {o2:w}, s2",
        "fmov {o3:w}, s3",
        "smstop sm",
        a = in(reg) a,
        b0 = in(reg) b0,
        b1 = in(reg) b1,
        b2 = in(reg) b2,
        b3 = in(reg) b3,
        n = in(reg) n,
        i = out(reg) _,
        o0 = lateout(reg) s0,
        o1 = lateout(reg) s1,
        o2 = lateout(reg) s2,
        o3 = lateout(reg) s3,
        out("v0") _, out("v1") _, out("v2") _, out("v3") _,
        out("v4") _, out("v5") _, out("v6") _, out("v7") _,
        out("v8") _, out("v9") _, out("v10") _, out("v11") _,
        out("v12") _, out("v13") _, out("v14") _, out("v15") _,
        out("v16") _, out("v17") _, out("v18") _, out("v19") _,
        out("v20") _, out("v21") _, out("v22") _, out("v23") _,
        out("v24") _, out("v25") _, out("v26") _, out("v27") _,
        out("v28") _, out("v29") _, out("v30") _, out("v31") _,
        out("p0") _, out("p1") _, out("p2") _, out("p3") _,
        out("p4") _, out("p5") _, out("p6") _, out("p7") _,
        out("p8") _, out("p9") _, out("p10") _, out("p11") _,
        out("p12") _, out("p13") _, out("p14") _, out("p15") _,
        out("ffr") _,
        options(nostack),
    );
    [
        f32::from_bits(s0),
        f32::from_bits(s1),
        f32::from_bits(s2),
        f32::from_bits(s3),
    ]
}
