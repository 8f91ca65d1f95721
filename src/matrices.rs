use crate::JenksNum;
use std::ops::Add;

/// The value of a dynamic-programming cell: a total within-class variance, or a
/// state that hasn't been reached yet. `Unreached` compares greater than every
/// finite value, so it behaves like positive infinity for integer types too.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) enum Cost<T> {
    Finite(T),
    Unreached,
}

impl<T: JenksNum> Add for Cost<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Unreached,
        }
    }
}

fn make_matrix<V: Copy>(rows: usize, columns: usize, fill: V) -> Vec<Vec<V>> {
    (0..rows).map(|_| vec![fill; columns]).collect()
}

/// Both tables are 1-indexed: `[prefix length][class count]`. Row and column 0
/// are never read.
pub(crate) struct Matrices<T> {
    // `LC` in Jenks' Fortran: the 1-based start of the last class
    pub(crate) lower_class_limits: Vec<Vec<usize>>,
    // `OP` in Jenks' Fortran
    pub(crate) variance_combinations: Vec<Vec<Cost<T>>>,
}

impl<T: JenksNum> Matrices<T> {
    fn new(nvalues: usize, nclasses: usize) -> Self {
        let mut lower_class_limits = make_matrix(nvalues + 1, nclasses + 1, 0);
        let mut variance_combinations =
            make_matrix(nvalues + 1, nclasses + 1, Cost::Finite(T::zero()));
        for class in 1..=nclasses {
            lower_class_limits[1][class] = 1;
            variance_combinations[1][class] = Cost::Finite(T::zero());
            for row in variance_combinations.iter_mut().skip(2) {
                row[class] = Cost::Unreached;
            }
        }
        Matrices {
            lower_class_limits,
            variance_combinations,
        }
    }

    /// Fill both tables for `data`, which must be sorted, non-empty, and at
    /// least `nclasses` long. The tables can be backtraced for any class count
    /// up to `nclasses`.
    ///
    /// No intermediate exceeds `(n · (max - min))²`.
    ///
    /// Returns `None` if a window length can't be represented in `T`.
    pub(crate) fn generate(data: &[T], nclasses: usize) -> Option<Self> {
        let nvalues = data.len();
        log::debug!(
            "building {} x {} class matrices",
            nvalues + 1,
            nclasses + 1
        );
        let mut matrices = Matrices::new(nvalues, nclasses);

        for l in 2..=nvalues {
            // every window ending at l is measured from its largest value, so the
            // sums scale with the window's range rather than its magnitude
            let anchor = data[l - 1];
            // "SZ" and "ZSQ" in the Fortran: running sums over the trailing window
            let mut sum = T::zero();
            let mut sum_squares = T::zero();
            let mut variance = T::zero();
            for m in 1..=l {
                let lower_class_limit = l - m + 1;
                let val = anchor - data[lower_class_limit - 1];
                sum = sum + val;
                sum_squares = sum_squares + val * val;
                variance = sum_squares - (sum * sum) / T::from_usize(m)?;
                if variance < T::zero() {
                    variance = T::zero();
                }

                let i4 = lower_class_limit - 1;
                if i4 == 0 {
                    continue;
                }
                for j in 2..=nclasses {
                    let candidate =
                        Cost::Finite(variance) + matrices.variance_combinations[i4][j - 1];
                    // ties go to the wider window
                    if matrices.variance_combinations[l][j] >= candidate {
                        matrices.lower_class_limits[l][j] = lower_class_limit;
                        matrices.variance_combinations[l][j] = candidate;
                    }
                }
            }
            matrices.lower_class_limits[l][1] = 1;
            matrices.variance_combinations[l][1] = Cost::Finite(variance);
        }
        Some(matrices)
    }
}
