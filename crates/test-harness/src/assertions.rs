//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context and shows expected vs actual so a
//! scenario failure reads like a report, not a bare panic.

use spring_geom::SolidResult;
use spring_types::HelixSegment;

use crate::helpers::HarnessError;

/// Assert two scalars agree within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.6}, got {:.6} (tol={})",
                ctx, expected, actual, tol,
            ),
        })
    }
}

/// Assert a segment plan is contiguous in height and winding angle.
pub fn assert_segments_contiguous(
    segments: &[HelixSegment],
    ctx: &str,
) -> Result<(), HarnessError> {
    for (i, pair) in segments.windows(2).enumerate() {
        let gap_z = (pair[1].start_z - pair[0].end_z()).abs();
        if gap_z > 1e-9 {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] height gap {:.9} between segments {} and {}",
                    ctx,
                    gap_z,
                    i,
                    i + 1,
                ),
            });
        }
        let gap_angle = (pair[1].start_angle - pair[0].start_angle - pair[0].delta_angle()).abs();
        if gap_angle > 1e-9 {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] angle gap {:.9} between segments {} and {}",
                    ctx,
                    gap_angle,
                    i,
                    i + 1,
                ),
            });
        }
    }
    Ok(())
}

/// Assert the summed segment heights reach `expected` within `tol`.
pub fn assert_stack_height(
    segments: &[HelixSegment],
    expected: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let total: f64 = segments.iter().map(|s| s.height).sum();
    assert_close(total, expected, tol, &format!("{} stack height", ctx))
}

/// Assert a synthesis outcome is a solid, with the recorded strategy and
/// shape class in the failure message.
pub fn assert_synthesized_solid(result: &SolidResult, ctx: &str) -> Result<(), HarnessError> {
    if result.is_solid() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected a solid, got {:?} (state {:?}, strategy {:?})",
                ctx, result.class, result.state, result.strategy,
            ),
        })
    }
}
