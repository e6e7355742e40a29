//! The facade crate exposes the full kernel API

use approx::assert_relative_eq;
use dotgeneral::prelude::*;
use dotgeneral::{inner_loop4_scalar, BlockDescriptor};

#[test]
fn test_prelude_round_trip() -> anyhow::Result<()> {
    let dispatcher = KernelDispatcher::new(DispatchConfig::from_json(
        r#"{ "min_standard_block": 32, "min_wide_block": 4096 }"#,
    )?)?;
    assert_eq!(dispatcher.config().min_standard_block, 32);

    let lhs: Vec<f32> = (0..40).map(|i| i as f32 * 0.25).collect();
    let rhs = vec![1.0f32; 160];
    let output = [1.0f32, 2.0, 3.0, 4.0];

    let bound = dispatcher.bind(40);
    assert!(bound.tier() <= capability());
    let sums = bound.call(&lhs, &rhs, &output, 0, 0, 0, 40);

    let expected = inner_loop4_scalar(&lhs, &rhs, &output, 0, 0, 0, 40);
    for k in 0..4 {
        assert_relative_eq!(sums[k], expected[k], epsilon = 1e-3);
    }

    let block = BlockDescriptor::from_flat(&lhs, &rhs, &output, 0, 0, 0, 40)?;
    assert_eq!(bound.call_block(&block), sums);
    Ok(())
}

#[test]
fn test_invalid_config_is_error() {
    let err = DispatchConfig::from_json(r#"{ "min_wide_block": 0 }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}
