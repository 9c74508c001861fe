//! CPU kernels for B-spline convolution
//!
//! Open splines cover `kernel_size - degree` intervals; closed splines wrap
//! around and cover all `kernel_size` positions.

use crate::dtype::Element;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Uniform B-spline piece `k_mod` of the given degree at `v` in `[0, 1)`
#[inline]
fn bspline_piece(v: f64, k_mod: usize, degree: usize) -> f64 {
    match (degree, k_mod) {
        (1, 0) => 1.0 - v,
        (1, _) => v,
        (2, 0) => 0.5 * v * v - v + 0.5,
        (2, 1) => -v * v + v + 0.5,
        (2, _) => 0.5 * v * v,
        (3, 0) => (1.0 - v) * (1.0 - v) * (1.0 - v) / 6.0,
        (3, 1) => (3.0 * v * v * v - 6.0 * v * v + 4.0) / 6.0,
        (3, 2) => (-3.0 * v * v * v + 3.0 * v * v + 3.0 * v + 1.0) / 6.0,
        (3, _) => v * v * v / 6.0,
        _ => 0.0,
    }
}

/// Evaluate basis products and kernel indices for every edge.
///
/// `basis` and `weight_index` are `[edges, (degree + 1)^dims]`, row-major.
/// `weight_index` addresses the flattened kernel where dimension 0 varies
/// fastest. The caller guarantees that `(degree + 1)^dims` fits in `usize`
/// and the product of `kernel_size` fits in `i64`.
pub fn spline_basis_kernel<T: Element>(
    pseudo: &[T],
    kernel_size: &[i64],
    is_open_spline: &[u8],
    degree: usize,
    basis: &mut [T],
    weight_index: &mut [i64],
) {
    let dims = kernel_size.len();
    let products = u32::try_from(dims)
        .ok()
        .and_then(|dims| (degree + 1).checked_pow(dims));
    let Some(products) = products else {
        return;
    };
    if basis.is_empty() {
        return;
    }

    for (e, (b_row, i_row)) in basis
        .chunks_mut(products)
        .zip(weight_index.chunks_mut(products))
        .enumerate()
    {
        let coords = &pseudo[e * dims..(e + 1) * dims];
        for (s, (b_out, i_out)) in b_row.iter_mut().zip(i_row.iter_mut()).enumerate() {
            let mut k = s;
            let mut wi = 0i64;
            let mut offset = 1i64;
            let mut b = 1.0f64;

            for d in 0..dims {
                let k_mod = k % (degree + 1);
                k /= degree + 1;

                let ks = kernel_size[d];
                let open = i64::from(is_open_spline[d]);
                let mut v = coords[d].to_f64() * (ks - degree as i64 * open) as f64;
                let floor = v.floor();

                wi += (floor as i64 + k_mod as i64).rem_euclid(ks) * offset;
                offset *= ks;

                v -= floor;
                b *= bspline_piece(v, k_mod, degree);
            }

            *b_out = T::from_f64(b);
            *i_out = wi;
        }
    }
}

/// Weight one edge: `out = sum_s basis[s] * (x @ weight[index[s]])`
#[inline]
fn weight_edge<T: Element>(
    x: &[T],
    weight: &[T],
    basis: &[T],
    index: &[i64],
    out: &mut [T],
) {
    let in_channels = x.len();
    let out_channels = out.len();
    let mut acc = vec![0.0f64; out_channels];

    for (&b, &wi) in basis.iter().zip(index) {
        let b = b.to_f64();
        let kernel = &weight[wi as usize * in_channels * out_channels..];
        for (ci, &xv) in x.iter().enumerate() {
            let scaled = b * xv.to_f64();
            let w_row = &kernel[ci * out_channels..(ci + 1) * out_channels];
            for (a, &w) in acc.iter_mut().zip(w_row) {
                *a += scaled * w.to_f64();
            }
        }
    }

    for (o, a) in out.iter_mut().zip(acc) {
        *o = T::from_f64(a);
    }
}

/// Mix edge features through the basis-selected kernel weights.
///
/// `x` is `[edges, in_channels]`, `weight` `[kernel, in_channels, out_channels]`,
/// `basis`/`weight_index` `[edges, products]` and `out` `[edges, out_channels]`.
/// Every `weight_index` entry must be below `kernel`.
#[allow(clippy::too_many_arguments)]
pub fn spline_weighting_kernel<T: Element>(
    x: &[T],
    weight: &[T],
    basis: &[T],
    weight_index: &[i64],
    out: &mut [T],
    in_channels: usize,
    out_channels: usize,
    products: usize,
) {
    if out_channels == 0 || products == 0 {
        return;
    }

    let edge = |(e, out_row): (usize, &mut [T])| {
        weight_edge(
            &x[e * in_channels..(e + 1) * in_channels],
            weight,
            &basis[e * products..(e + 1) * products],
            &weight_index[e * products..(e + 1) * products],
            out_row,
        )
    };

    #[cfg(feature = "rayon")]
    out.par_chunks_mut(out_channels).enumerate().for_each(edge);

    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(out_channels).enumerate().for_each(edge);
}
