//! Single dot product in streaming SVE mode

use std::arch::asm;

/// SME implementation of dot product for f32
///
/// # Safety
/// The CPU must implement SME, and `a` and `b` must be valid for reads of
/// `n` elements for the whole call.
#[inline(never)]
pub unsafe fn dot_product_sme(a: *const f32, b: *const f32, n: usize) -> f32 {
    let bits: u32;
    asm!(
        ".arch_extension sve",
        ".arch_extension sme",
        "smstart sm",
        "mov {i}, #0",
        "dup z0.s, #0",
        "ptrue p0.s",
        "whilelt p1.s, {i}, {n}",
        "b.eq 2f",
        "1:",
        "ld1w {{z1.s}}, p1/z, [{a}, {i}, lsl #2]",
        "ld1w {{z2.s}}, p1/z, [{b}, {i}, lsl #2]",
        "fmla z0.s, p1/m, z1.s, z2.s",
        "incw {i}",
        "whilelt p1.s, {i}, {n}",
        // first lane active => more work
        "b.mi 1b",
        "2:",
        "faddv s0, p0, z0.s",
        "fmov {out:w}, s0",
        "smstop sm",
        a = in(reg) a,
        b = in(reg) b,
        n = in(reg) n,
        i = out(reg) _,
        out = lateout(reg) bits,
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
    f32::from_bits(bits)
}

/// Number of 32-bit lanes in a streaming-mode vector
///
/// # Safety
/// The CPU must implement SME.
pub unsafe fn streaming_vector_lanes() -> usize {
    let bytes: usize;
    asm!(
        ".arch_extension sme",
        // streaming vector length in bytes, readable outside streaming mode
        "rdsvl {bytes}, #1",
        bytes = out(reg) bytes,
        options(nomem, nostack, preserves_flags),
    );
    bytes / std::mem::size_of::<f32>()
}
