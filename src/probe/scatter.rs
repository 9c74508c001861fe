//! Functional checks of the five scatter reductions on literal inputs.

use super::extension::Extension;
use super::guard::run_check;
use super::outcome::Report;
use super::residency::{Residency, outputs_resident};
use crate::config::ProbeConfig;
use crate::error::Result;
use crate::ops::{CompareOps, ScatterOps, ScatterReduce};
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;

/// A hand-computed scatter scenario along dim 0.
#[derive(Debug, Clone, Copy)]
pub struct ScatterCase {
    /// Check name
    pub name: &'static str,
    /// Reduction under test
    pub reduce: ScatterReduce,
    /// Source values
    pub src: &'static [f32],
    /// Target slot of each source value
    pub index: &'static [i64],
    /// Expected reduced values
    pub expected: &'static [f32],
    /// Expected source positions, for min and max
    pub expected_arg: Option<&'static [i64]>,
}

/// The literal scenarios, in execution order.
pub const SCATTER_CASES: [ScatterCase; 5] = [
    ScatterCase {
        name: "scatter_sum test",
        reduce: ScatterReduce::Sum,
        src: &[10.0, 20.0, 30.0, 40.0],
        index: &[2, 0, 1, 2],
        expected: &[20.0, 30.0, 50.0],
        expected_arg: None,
    },
    // slot 1 never receives a value and keeps the multiplicative identity
    ScatterCase {
        name: "scatter_mul test",
        reduce: ScatterReduce::Mul,
        src: &[2.0, 2.0, 3.0],
        index: &[0, 0, 2],
        expected: &[4.0, 1.0, 3.0],
        expected_arg: None,
    },
    ScatterCase {
        name: "scatter_mean test",
        reduce: ScatterReduce::Mean,
        src: &[10.0, 20.0, 30.0, 40.0],
        index: &[0, 0, 1, 1],
        expected: &[15.0, 35.0],
        expected_arg: None,
    },
    ScatterCase {
        name: "scatter_min test",
        reduce: ScatterReduce::Min,
        src: &[10.0, 5.0, 8.0, 2.0],
        index: &[1, 1, 0, 1],
        expected: &[8.0, 2.0],
        expected_arg: Some(&[2, 3]),
    },
    ScatterCase {
        name: "scatter_max test",
        reduce: ScatterReduce::Max,
        src: &[3.0, 10.0, 8.0, 12.0],
        index: &[0, 1, 1, 1],
        expected: &[3.0, 12.0],
        expected_arg: Some(&[0, 3]),
    },
];

/// Run every scenario of [`SCATTER_CASES`] and log the final summary.
///
/// Without the scatter extension this logs the abort and returns an empty
/// report.
pub fn run_scatter_suite<R>(client: &R::Client, config: &ProbeConfig) -> Report
where
    R: Runtime,
    R::Client: ScatterOps<R> + CompareOps<R>,
{
    let mut report = Report::new();

    if let Err(err) = Extension::Scatter.require() {
        tracing::error!("[ERROR] {} extension not found: {err}", Extension::Scatter);
        tracing::error!("[ABORT] {} is not available. Exiting.", Extension::Scatter);
        return report;
    }

    let _span = tracing::info_span!(
        "scatter_suite",
        runtime = R::name(),
        accelerator = R::is_accelerator()
    )
    .entered();
    for case in &SCATTER_CASES {
        let _check = tracing::info_span!("check", name = case.name).entered();
        report.record(run_check(case.name, || check_case::<R>(client, config, case)));
    }

    report.log_summary();
    report
}

/// Run one scenario and compare against its expectation.
pub fn check_case<R>(client: &R::Client, config: &ProbeConfig, case: &ScatterCase) -> Result<bool>
where
    R: Runtime,
    R::Client: ScatterOps<R> + CompareOps<R>,
{
    let device = client.device();
    let src = Tensor::<R>::try_from_slice(case.src, &[case.src.len()], device)?;
    let index = Tensor::<R>::try_from_slice(case.index, &[case.index.len()], device)?;
    let expected = Tensor::<R>::try_from_slice(case.expected, &[case.expected.len()], device)?;

    let (out, arg) = match case.reduce {
        ScatterReduce::Min => {
            let (out, arg) = client.scatter_min(&src, &index, 0, None)?;
            (out, Some(arg))
        }
        ScatterReduce::Max => {
            let (out, arg) = client.scatter_max(&src, &index, 0, None)?;
            (out, Some(arg))
        }
        reduce => (client.scatter(&src, &index, 0, None, reduce)?, None),
    };

    tracing::info!(src = %src, index = %index, "inputs");
    tracing::info!(out = %out, expected = %expected, residency = %Residency::of(&out), "values");

    let mut passed = client.allclose(&out, &expected, config.atol, 0.0)?;
    let mut outputs = vec![&out];

    if let (Some(arg), Some(expected_arg)) = (arg.as_ref(), case.expected_arg) {
        let expected_arg = Tensor::<R>::try_from_slice(expected_arg, &[expected_arg.len()], device)?;
        tracing::info!(
            arg_out = %arg,
            expected_arg_out = %expected_arg,
            residency = %Residency::of(arg),
            "positions"
        );
        passed &= client.equal(arg, &expected_arg)?;
        outputs.push(arg);
    }

    Ok(passed && outputs_resident::<R>(device, &outputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_are_well_formed() {
        for case in &SCATTER_CASES {
            assert_eq!(case.src.len(), case.index.len(), "{}", case.name);
            let max = *case.index.iter().max().unwrap() as usize;
            assert_eq!(case.expected.len(), max + 1, "{}", case.name);
            assert_eq!(case.expected_arg.is_some(), case.reduce.has_arg());
        }
    }
}
