//! Gradient operator table
//!
//! Each operator is a pair of fixed integer kernels, `gx` and `gy`, stored
//! row-major as `[dy][dx]`.

use std::fmt;
use std::str::FromStr;

use crate::error::EdgeError;

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

const PREWITT_X: [i32; 9] = [-1, 0, 1, -1, 0, 1, -1, 0, 1];
const PREWITT_Y: [i32; 9] = [-1, -1, -1, 0, 0, 0, 1, 1, 1];

const ROBERTS_X: [i32; 4] = [1, 0, 0, -1];
const ROBERTS_Y: [i32; 4] = [0, 1, -1, 0];

/// Supported edge operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// 3x3 Sobel
    #[default]
    Sobel,
    /// 3x3 Prewitt
    Prewitt,
    /// 2x2 Roberts cross
    Roberts,
}

/// Kernel pair of one operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelPair {
    /// Side length of the square window
    pub size: usize,
    /// Horizontal gradient kernel, row-major
    pub gx: &'static [i32],
    /// Vertical gradient kernel, row-major
    pub gy: &'static [i32],
}

impl KernelPair {
    /// Horizontal kernel weight at (row, col)
    #[inline]
    pub fn gx_at(&self, row: usize, col: usize) -> i32 {
        self.gx[row * self.size + col]
    }

    /// Vertical kernel weight at (row, col)
    #[inline]
    pub fn gy_at(&self, row: usize, col: usize) -> i32 {
        self.gy[row * self.size + col]
    }
}

impl Operator {
    /// All operators, in selector order
    pub const ALL: [Operator; 3] = [Operator::Sobel, Operator::Prewitt, Operator::Roberts];

    /// Kernel pair for this operator
    pub fn kernels(&self) -> KernelPair {
        match self {
            Operator::Sobel => KernelPair {
                size: 3,
                gx: &SOBEL_X,
                gy: &SOBEL_Y,
            },
            Operator::Prewitt => KernelPair {
                size: 3,
                gx: &PREWITT_X,
                gy: &PREWITT_Y,
            },
            Operator::Roberts => KernelPair {
                size: 2,
                gx: &ROBERTS_X,
                gy: &ROBERTS_Y,
            },
        }
    }

    /// Side length of the operator window
    pub fn window_size(&self) -> usize {
        self.kernels().size
    }

    /// Lower-case selector name
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Sobel => "sobel",
            Operator::Prewitt => "prewitt",
            Operator::Roberts => "roberts",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = EdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sobel" => Ok(Operator::Sobel),
            "prewitt" => Ok(Operator::Prewitt),
            "roberts" | "roberts-cross" => Ok(Operator::Roberts),
            _ => Err(EdgeError::UnknownOperator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_sizes() {
        assert_eq!(Operator::Sobel.window_size(), 3);
        assert_eq!(Operator::Prewitt.window_size(), 3);
        assert_eq!(Operator::Roberts.window_size(), 2);
        for op in Operator::ALL {
            let k = op.kernels();
            assert_eq!(k.gx.len(), k.size * k.size);
            assert_eq!(k.gy.len(), k.size * k.size);
        }
    }

    #[test]
    fn test_kernel_layout() {
        let sobel = Operator::Sobel.kernels();
        assert_eq!(sobel.gx_at(1, 0), -2);
        assert_eq!(sobel.gx_at(1, 2), 2);
        assert_eq!(sobel.gy_at(2, 1), 2);

        let roberts = Operator::Roberts.kernels();
        assert_eq!(roberts.gx_at(1, 1), -1);
        assert_eq!(roberts.gy_at(0, 1), 1);
        assert_eq!(roberts.gy_at(1, 0), -1);
    }

    #[test]
    fn test_kernels_sum_to_zero() {
        for op in Operator::ALL {
            let k = op.kernels();
            assert_eq!(k.gx.iter().sum::<i32>(), 0, "{op} gx");
            assert_eq!(k.gy.iter().sum::<i32>(), 0, "{op} gy");
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Sobel".parse::<Operator>().unwrap(), Operator::Sobel);
        assert_eq!(" prewitt ".parse::<Operator>().unwrap(), Operator::Prewitt);
        assert_eq!("roberts-cross".parse::<Operator>().unwrap(), Operator::Roberts);
        assert!(matches!(
            "canny".parse::<Operator>(),
            Err(EdgeError::UnknownOperator(_))
        ));
        for op in Operator::ALL {
            assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
        }
    }
}
