//! CPU kernels for scatter reductions
//!
//! Tensors are viewed as `[outer, dim, inner]` blocks (see `ScatterPlan`).
//! Index values are validated by the caller; kernels trust them.

use crate::dtype::Element;
use crate::ops::ScatterReduce;
use crate::ops::scatter_common::ScatterPlan;

/// Position of the index entry that routes source element `(o, i, j)`
#[inline]
fn index_offset(plan: &ScatterPlan, o: usize, i: usize, j: usize) -> usize {
    if plan.broadcast_index {
        i
    } else {
        (o * plan.src_dim + i) * plan.inner + j
    }
}

/// Scatter-reduce `src` into `out` along the planned dimension.
///
/// For `Min`/`Max`, `arg` receives the source position (along the scatter
/// dimension) of the selected element; slots no element reaches hold
/// `plan.src_dim` and a zero value. Ties keep the first occurrence.
///
/// # Safety
///
/// - `src` must hold `plan.outer * plan.src_dim * plan.inner` elements
/// - `index` must hold either `plan.src_dim` (broadcast) or as many elements as `src`,
///   each in `0..plan.dim_size`
/// - `out` must hold `plan.out_numel()` elements
/// - `arg` must be null or hold `plan.out_numel()` elements
pub unsafe fn scatter_reduce_kernel<T: Element>(
    src: *const T,
    index: *const i64,
    out: *mut T,
    arg: *mut i64,
    plan: &ScatterPlan,
    reduce: ScatterReduce,
) {
    let out_numel = plan.out_numel();
    let init = match reduce {
        ScatterReduce::Mul => T::one(),
        _ => T::zero(),
    };
    for p in 0..out_numel {
        *out.add(p) = init;
    }
    if !arg.is_null() {
        for p in 0..out_numel {
            *arg.add(p) = plan.src_dim as i64;
        }
    }

    // Mean needs per-slot counts, min/max need a "seen" flag
    let mut counts = match reduce {
        ScatterReduce::Mean | ScatterReduce::Min | ScatterReduce::Max => vec![0usize; out_numel],
        _ => Vec::new(),
    };

    for o in 0..plan.outer {
        for i in 0..plan.src_dim {
            for j in 0..plan.inner {
                let s = (o * plan.src_dim + i) * plan.inner + j;
                let target = *index.add(index_offset(plan, o, i, j)) as usize;
                let d = (o * plan.dim_size + target) * plan.inner + j;
                let v = *src.add(s);
                let slot = out.add(d);

                match reduce {
                    ScatterReduce::Sum => *slot = *slot + v,
                    ScatterReduce::Mul => *slot = *slot * v,
                    ScatterReduce::Mean => {
                        *slot = *slot + v;
                        counts[d] += 1;
                    }
                    ScatterReduce::Min | ScatterReduce::Max => {
                        let better = match reduce {
                            ScatterReduce::Min => v < *slot,
                            _ => v > *slot,
                        };
                        if counts[d] == 0 || better {
                            *slot = v;
                            if !arg.is_null() {
                                *arg.add(d) = i as i64;
                            }
                        }
                        counts[d] += 1;
                    }
                }
            }
        }
    }

    if reduce == ScatterReduce::Mean {
        for (d, &c) in counts.iter().enumerate() {
            if c > 1 {
                let slot = out.add(d);
                *slot = T::from_f64((*slot).to_f64() / c as f64);
            }
        }
    }
}

/// Softmax of `src` within each group of elements sharing an index.
///
/// The output has the shape of `src`. Groups are keyed by
/// `(outer, index, inner)` and numbered densely, so index values may be
/// arbitrarily large. Computed in f64 with the group maximum subtracted
/// before exponentiation.
///
/// # Safety
///
/// - `src` and `out` must hold `plan.outer * plan.src_dim * plan.inner` elements
/// - `index` must satisfy the layout required by [`scatter_reduce_kernel`],
///   with non-negative values
pub unsafe fn scatter_softmax_kernel<T: Element>(
    src: *const T,
    index: *const i64,
    out: *mut T,
    plan: &ScatterPlan,
) {
    let numel = plan.outer * plan.src_dim * plan.inner;
    let mut keys = Vec::with_capacity(numel);
    for o in 0..plan.outer {
        for i in 0..plan.src_dim {
            for j in 0..plan.inner {
                keys.push((o, *index.add(index_offset(plan, o, i, j)), j));
            }
        }
    }

    let mut distinct = keys.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let group: Vec<usize> = keys
        .iter()
        .map(|key| distinct.binary_search(key).unwrap_or_default())
        .collect();

    let groups = distinct.len();
    let mut max = vec![f64::NEG_INFINITY; groups];
    for (s, &g) in group.iter().enumerate() {
        let v = (*src.add(s)).to_f64();
        if v > max[g] {
            max[g] = v;
        }
    }

    let mut sum = vec![0.0f64; groups];
    let mut exp = Vec::with_capacity(numel);
    for (s, &g) in group.iter().enumerate() {
        let e = ((*src.add(s)).to_f64() - max[g]).exp();
        sum[g] += e;
        exp.push(e);
    }

    for (s, (&g, &e)) in group.iter().zip(&exp).enumerate() {
        *out.add(s) = T::from_f64(e / sum[g]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::scatter_common::scatter_plan;

    #[test]
    fn test_sum_kernel_1d() {
        let src = [1.0f64, 2.0, 3.0, 4.0];
        let index = [0i64, 1, 0, 1];
        let mut out = [0.0f64; 2];
        let plan = scatter_plan(&[4], 0, false, 2).unwrap();
        unsafe {
            scatter_reduce_kernel(
                src.as_ptr(),
                index.as_ptr(),
                out.as_mut_ptr(),
                std::ptr::null_mut(),
                &plan,
                ScatterReduce::Sum,
            );
        }
        assert_eq!(out, [4.0, 6.0]);
    }

    #[test]
    fn test_max_kernel_arg_and_empty_slot() {
        let src = [5i64, 7, 7];
        let index = [0i64, 0, 0];
        let mut out = [0i64; 2];
        let mut arg = [0i64; 2];
        let plan = scatter_plan(&[3], 0, false, 2).unwrap();
        unsafe {
            scatter_reduce_kernel(
                src.as_ptr(),
                index.as_ptr(),
                out.as_mut_ptr(),
                arg.as_mut_ptr(),
                &plan,
                ScatterReduce::Max,
            );
        }
        assert_eq!(out, [7, 0]);
        assert_eq!(arg, [1, 3]);
    }

    #[test]
    fn test_softmax_kernel_groups_sum_to_one() {
        let src = [1.0f32, 2.0, 3.0, 0.5];
        let index = [0i64, 0, 1, 1];
        let mut out = [0.0f32; 4];
        let plan = scatter_plan(&[4], 0, false, 2).unwrap();
        unsafe {
            scatter_softmax_kernel(src.as_ptr(), index.as_ptr(), out.as_mut_ptr(), &plan);
        }
        assert!((out[0] + out[1] - 1.0).abs() < 1e-6);
        assert!((out[2] + out[3] - 1.0).abs() < 1e-6);
        assert!(out[1] > out[0]);
    }
}
