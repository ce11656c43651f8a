use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use crate::{DType, Error, Result, Tensor};

const KERNEL: [usize; 2] = [3, 3];

/// How [`conv2d_with`] treats cells whose 3x3 neighbourhood leaves the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    /// Only interior cells are computed, the outermost ring stays zero.
    Internal,
    /// Pad with a constant value. Rejected with `NotSupported` for now.
    Constant,
    /// Repeat the edge cell. Rejected with `NotSupported` for now.
    Replicate,
    /// Mirror across the edge without repeating it: index `-1` reads `1` and
    /// index `n` reads `n - 2`.
    #[default]
    Reflect,
    /// Read from the opposite edge. Rejected with `NotSupported` for now.
    Wrap,
}

impl BorderType {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Internal | Self::Reflect)
    }
}

/// 3x3 convolution of `tensor` with `filter` into `ret`, reflecting at the
/// borders.
pub fn conv2d<T: DType>(
    tensor: &Tensor<T, 2>,
    filter: &Tensor<T, 2>,
    ret: &mut Tensor<T, 2>,
) -> Result<()> {
    conv2d_with(tensor, filter, ret, BorderType::Reflect, T::ZERO)
}

/// 3x3 convolution of `tensor` with `filter` into `ret`.
///
/// `ret` must already have the shape of `tensor`; it is zero-filled before
/// accumulation. Interior cells are computed as
/// `sum(tensor[i + m - 1][j + n - 1] * filter[n][m])`, i.e. with the filter read
/// transposed, while the border passes read it as `filter[m][n]`. For a
/// symmetric filter the two agree.
///
/// `constant` is the fill value for [`BorderType::Constant`], which is not
/// implemented yet. Unsupported policies fail before `ret` is touched, as do
/// all shape errors.
pub fn conv2d_with<T: DType>(
    tensor: &Tensor<T, 2>,
    filter: &Tensor<T, 2>,
    ret: &mut Tensor<T, 2>,
    border: BorderType,
    constant: T,
) -> Result<()> {
    if filter.dims != KERNEL {
        return Err(Error::KernelShape {
            expected: KERNEL.to_vec(),
            got: filter.dims.to_vec(),
        }
        .bt());
    }
    if ret.dims != tensor.dims {
        return Err(Error::ShapeMismatch {
            op: "conv2d",
            expected: tensor.dims.to_vec(),
            got: ret.dims.to_vec(),
        }
        .bt());
    }
    if !border.is_supported() {
        return Err(Error::UnsupportedBorder(border).bt());
    }

    let [rows, cols] = *tensor.dims;
    let empty = rows == 0 || cols == 0;
    if !empty && border == BorderType::Reflect && (rows < 2 || cols < 2) {
        return Err(Error::ShapeTooSmall {
            op: "conv2d",
            shape: tensor.dims.to_vec(),
            min: 2,
        }
        .bt());
    }

    let _span =
        tracing::debug_span!("conv2d", shape = %tensor.dims, ?border, %constant).entered();

    ret.fill(T::ZERO);
    if empty {
        return Ok(());
    }

    if rows > 2 && cols > 2 {
        interior(tensor, filter, ret);
    }
    if border == BorderType::Reflect {
        reflect_edges(tensor, filter, ret);
        reflect_corners(tensor, filter, ret);
    }
    Ok(())
}

fn interior<T: DType>(tensor: &Tensor<T, 2>, filter: &Tensor<T, 2>, ret: &mut Tensor<T, 2>) {
    let [rows, cols] = *ret.dims;
    ret.data[1..rows - 1]
        .par_iter_mut()
        .enumerate()
        .for_each(|(r, row)| {
            let i = r + 1;
            for j in 1..cols - 1 {
                let mut acc = T::ZERO;
                for m in 0..3 {
                    for n in 0..3 {
                        acc = acc + tensor[i + m - 1][j + n - 1] * filter[n][m];
                    }
                }
                row[j] = acc;
            }
        });
}

/// Reflected neighbour `k` of the first cell along an axis.
#[inline]
fn lower(k: usize) -> usize {
    if k >= 1 {
        k - 1
    } else {
        1
    }
}

/// Reflected neighbour `k` of the last cell `lim` along an axis.
#[inline]
fn upper(k: usize, lim: usize) -> usize {
    if k <= 1 {
        lim + k - 1
    } else {
        lim - 1
    }
}

fn reflect_edges<T: DType>(
    tensor: &Tensor<T, 2>,
    filter: &Tensor<T, 2>,
    ret: &mut Tensor<T, 2>,
) {
    let [rows, cols] = *ret.dims;
    let (y_lim, x_lim) = (rows - 1, cols - 1);

    // left and right columns
    ret.data[1..y_lim]
        .par_iter_mut()
        .enumerate()
        .for_each(|(r, row)| {
            let i = r + 1;
            for m in 0..3 {
                for n in 0..3 {
                    let y = i + m - 1;
                    let w = filter[m][n];
                    row[0] = row[0] + tensor[y][lower(n)] * w;
                    row[x_lim] = row[x_lim] + tensor[y][upper(n, x_lim)] * w;
                }
            }
        });

    // top and bottom rows
    let (head, tail) = ret.data.split_at_mut(y_lim);
    let (top, bottom) = (&mut head[0], &mut tail[0]);
    top.data[1..x_lim]
        .par_iter_mut()
        .zip(bottom.data[1..x_lim].par_iter_mut())
        .enumerate()
        .for_each(|(c, (t, b))| {
            let j = c + 1;
            for m in 0..3 {
                for n in 0..3 {
                    let x = j + n - 1;
                    let w = filter[m][n];
                    *t = *t + tensor[lower(m)][x] * w;
                    *b = *b + tensor[upper(m, y_lim)][x] * w;
                }
            }
        });
}

fn reflect_corners<T: DType>(
    tensor: &Tensor<T, 2>,
    filter: &Tensor<T, 2>,
    ret: &mut Tensor<T, 2>,
) {
    let [rows, cols] = *ret.dims;
    let (y_lim, x_lim) = (rows - 1, cols - 1);

    for m in 0..3 {
        for n in 0..3 {
            let (yl, xl) = (lower(m), lower(n));
            let (yu, xu) = (upper(m, y_lim), upper(n, x_lim));
            let w = filter[m][n];
            ret[0][0] = ret[0][0] + tensor[yl][xl] * w;
            ret[0][x_lim] = ret[0][x_lim] + tensor[yl][xu] * w;
            ret[y_lim][0] = ret[y_lim][0] + tensor[yu][xl] * w;
            ret[y_lim][x_lim] = ret[y_lim][x_lim] + tensor[yu][xu] * w;
        }
    }
}
