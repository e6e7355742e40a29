//! SME detection on macOS (Apple M4 and later) via `sysctlbyname`

use std::ffi::CStr;

const FEAT_SME: &[u8] = b"hw.optional.arm.FEAT_SME\0";

pub(super) fn query_sme() -> bool {
    let name = match CStr::from_bytes_with_nul(FEAT_SME) {
        Ok(name) => name,
        Err(_) => return false,
    };
    let mut value = [0u8; 8];
    let mut len: libc::size_t = value.len();

    // SAFETY: `name` is NUL-terminated, `value` is writable for `len` bytes and
    // `len` is updated by the kernel to the number of bytes written.
    let rc = unsafe {
        libc::sysctlbyname(
            name.as_ptr(),
            value.as_mut_ptr().cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        log::debug!(
            "sysctlbyname(hw.optional.arm.FEAT_SME) failed: {}",
            std::io::Error::last_os_error()
        );
        return false;
    }
    super::flag_bytes_set(&value[..len.min(value.len())])
}
