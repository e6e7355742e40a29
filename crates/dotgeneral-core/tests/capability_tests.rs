//! Repeated capability queries and the fail-loud wide path

use dotgeneral_core::{
    capability, detect_wide_vector_capability, dot_wide, group_dot_wide4, inner_loop4_wide,
    Capability, Error, KernelDispatcher, WideBackend,
};

#[test]
fn test_repeated_queries_stable() {
    let first = capability();
    for _ in 0..1000 {
        assert_eq!(capability(), first);
    }
}

#[test]
fn test_wide_path_aborts_when_unavailable() {
    if detect_wide_vector_capability() {
        return;
    }
    let a = vec![1.0f32; 4096];
    let b = vec![2.0f32; 4 * 4096];
    let output = [0.0f32; 4];

    let result = std::panic::catch_unwind(|| dot_wide(&a, &b, 0, 0, 4096));
    assert!(result.is_err(), "dot_wide returned a value without SME");

    let result = std::panic::catch_unwind(|| group_dot_wide4(&a, &b, 0, 4096, 0, 4096));
    assert!(result.is_err(), "group_dot_wide4 returned a value without SME");

    let result = std::panic::catch_unwind(|| inner_loop4_wide(&a, &b, &output, 0, 0, 0, 4096));
    assert!(result.is_err(), "inner_loop4_wide returned a value without SME");

    assert!(matches!(WideBackend::try_new(), Err(Error::FeatureNotAvailable(_))));
    assert!(KernelDispatcher::default().bind_tier(Capability::Wide).is_err());
}

#[test]
fn test_wide_backend_when_available() {
    if !detect_wide_vector_capability() {
        return;
    }
    let backend = WideBackend::new();
    assert_eq!(capability(), Capability::Wide);
    assert!(dotgeneral_core::primitives::streaming_lanes() >= 4);

    let a = vec![1.0f32; 512];
    let b = vec![2.0f32; 512];
    use dotgeneral_core::DotKernel;
    assert!((backend.dot(&a, &b, 0, 0, 512) - 1024.0).abs() < 1e-3);
}
