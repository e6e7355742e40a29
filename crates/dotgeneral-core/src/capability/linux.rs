//! SME detection on Linux/Android via the auxiliary vector

/// `HWCAP2_SME` from arch/arm64/include/uapi/asm/hwcap.h
const HWCAP2_SME: libc::c_ulong = 1 << 23;

pub(super) fn query_sme() -> bool {
    // SAFETY: getauxval has no preconditions; it returns 0 for unknown entries.
    let hwcap2 = unsafe { libc::getauxval(libc::AT_HWCAP2) };
    hwcap2 & HWCAP2_SME != 0
}
