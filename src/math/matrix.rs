use std::fmt;
use std::io::{BufRead, Write};
use std::ops::{Add, Deref, Index, IndexMut, Mul, Sub};
use std::slice::{Iter, IterMut};
use std::str::FromStr;

use num_traits::{One, Zero};

use crate::config::Limits;
use crate::error::{check_size, LinalgError, Result};
use crate::io::TokenReader;
use crate::math::vector::DynamicVector;

/// Square matrix stored as `size` rows of length `size`.
///
/// Rows are reachable immutably through `m[i]` / [`DynamicMatrix::at`] and
/// mutably only through [`RowMut`], which allows element writes but never
/// swapping in a row of another length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DynamicMatrix<T> {
    rows: DynamicVector<DynamicVector<T>>,
}

impl<T: Default> DynamicMatrix<T> {
    pub fn new(size: usize) -> Result<Self> {
        Self::with_limits(size, &Limits::default())
    }

    pub fn with_limits(size: usize, limits: &Limits) -> Result<Self> {
        Self::from_fn_with_limits(size, limits, |_, _| T::default())
    }
}

impl<T: Default> Default for DynamicMatrix<T> {
    fn default() -> Self {
        Self {
            rows: DynamicVector::default(),
        }
    }
}

impl<T: Zero + One> DynamicMatrix<T> {
    pub fn identity(size: usize) -> Result<Self> {
        Self::from_fn(size, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> DynamicMatrix<T> {
    /// Build a `size`×`size` matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(size: usize, f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        Self::from_fn_with_limits(size, &Limits::default(), f)
    }

    pub fn from_fn_with_limits<F>(size: usize, limits: &Limits, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        check_size(size, limits.max_matrix_size())?;
        log::trace!("Allocating {}x{} matrix", size, size);
        let rows: Box<[DynamicVector<T>]> = (0..size)
            .map(|i| DynamicVector::from_boxed((0..size).map(|j| f(i, j)).collect()))
            .collect();
        Ok(Self::from_row_vector(DynamicVector::from_boxed(rows)))
    }

    /// Build a matrix from nested rows; every row must be as long as the
    /// number of rows. The row count is checked against `Limits::default()`.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows_with_limits(rows, &Limits::default())
    }

    pub fn from_rows_with_limits(rows: Vec<Vec<T>>, limits: &Limits) -> Result<Self> {
        let size = rows.len();
        check_size(size, limits.max_matrix_size())?;
        if let Some(ragged) = rows.iter().find(|row| row.len() != size) {
            return Err(LinalgError::SizeMismatch {
                lhs: size,
                rhs: ragged.len(),
            });
        }
        let rows: Box<[DynamicVector<T>]> = rows
            .into_iter()
            .map(|row| DynamicVector::from_boxed(row.into_boxed_slice()))
            .collect();
        Ok(Self::from_row_vector(DynamicVector::from_boxed(rows)))
    }

    fn from_row_vector(rows: DynamicVector<DynamicVector<T>>) -> Self {
        Self { rows }
    }

    /// Row and column count.
    pub fn size(&self) -> usize {
        self.rows.size()
    }

    pub fn at(&self, index: usize) -> Result<&DynamicVector<T>> {
        self.rows.at(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Result<RowMut<'_, T>> {
        self.rows.at_mut(index).map(|row| RowMut { row })
    }

    pub fn rows(&self) -> Iter<'_, DynamicVector<T>> {
        self.rows.iter()
    }

    fn ensure_same_size(&self, other: &Self, op: &str) -> Result<()> {
        if self.size() != other.size() {
            log::debug!(
                "Rejected matrix {}: sizes {} and {} differ",
                op,
                self.size(),
                other.size()
            );
            return Err(LinalgError::SizeMismatch {
                lhs: self.size(),
                rhs: other.size(),
            });
        }
        Ok(())
    }

    fn zip_rows<F>(&self, other: &Self, op: &str, f: F) -> Result<Self>
    where
        F: Fn(&DynamicVector<T>, &DynamicVector<T>) -> Result<DynamicVector<T>>,
    {
        self.ensure_same_size(other, op)?;
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Box<[_]>>>()?;
        Ok(Self::from_row_vector(DynamicVector::from_boxed(rows)))
    }
}

impl<T: Clone + Add<Output = T>> DynamicMatrix<T> {
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_rows(other, "addition", |a, b| a.checked_add(b))
    }
}

impl<T: Clone + Sub<Output = T>> DynamicMatrix<T> {
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_rows(other, "subtraction", |a, b| a.checked_sub(b))
    }
}

impl<T: Clone + Mul<Output = T>> DynamicMatrix<T> {
    pub fn mul_scalar(&self, value: &T) -> Self {
        Self::from_row_vector(self.rows.map(|row| row.mul_scalar(value)))
    }
}

impl<T: Clone + Zero + Mul<Output = T>> DynamicMatrix<T> {
    /// Matrix-vector product; element `i` of the result is `row_i · v`.
    pub fn mul_vector(&self, v: &DynamicVector<T>) -> Result<DynamicVector<T>> {
        self.rows.ensure_same_size(v, "matrix-vector product")?;
        let values = self
            .rows
            .iter()
            .map(|row| row.dot(v))
            .collect::<Result<Box<[T]>>>()?;
        Ok(DynamicVector::from_boxed(values))
    }

    /// Matrix product with `result[i][j] = Σ_k self[i][k] * other[k][j]`,
    /// summed from `T::zero()` in increasing `k`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        self.ensure_same_size(other, "product")?;
        let n = self.size();
        let rows: Box<[DynamicVector<T>]> = self
            .rows
            .iter()
            .map(|lhs_row| {
                let row: Box<[T]> = (0..n)
                    .map(|j| {
                        lhs_row
                            .iter()
                            .zip(other.rows.iter())
                            .fold(T::zero(), |acc, (a, rhs_row)| {
                                acc + a.clone() * rhs_row[j].clone()
                            })
                    })
                    .collect();
                DynamicVector::from_boxed(row)
            })
            .collect();
        Ok(Self::from_row_vector(DynamicVector::from_boxed(rows)))
    }
}

impl<T: FromStr> DynamicMatrix<T>
where
    T::Err: fmt::Display,
{
    /// Read `size()` rows of `size()` tokens each, row-major.
    ///
    /// All rows are parsed before any is stored, so a failed read leaves
    /// the matrix as it was. A short input reports token counts for the
    /// whole matrix, not for the row that ran out.
    pub fn read_from<R: BufRead>(&mut self, input: &mut TokenReader<R>) -> Result<()> {
        let n = self.size();
        let rows = (0..n)
            .map(|i| {
                DynamicVector::<T>::read_new(input, n).map_err(|e| match e {
                    LinalgError::UnexpectedEof { found, .. } => LinalgError::UnexpectedEof {
                        expected: n * n,
                        found: i * n + found,
                    },
                    other => other,
                })
            })
            .collect::<Result<Box<[_]>>>()?;
        self.rows = DynamicVector::from_boxed(rows);
        Ok(())
    }

    pub fn read_str(&mut self, input: &str) -> Result<()> {
        self.read_from(&mut TokenReader::from_text(input))
    }
}

impl<T: fmt::Display> DynamicMatrix<T> {
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        Ok(())
    }
}

/// Mutable handle to one matrix row.
///
/// Reads go through `Deref` to the row vector; writes are element-level.
pub struct RowMut<'a, T> {
    row: &'a mut DynamicVector<T>,
}

impl<'a, T> RowMut<'a, T> {
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.row.at_mut(index)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.row.iter_mut()
    }

    /// Overwrite the row with a copy of `values`, which must have the same
    /// length.
    pub fn assign(&mut self, values: &DynamicVector<T>) -> Result<()>
    where
        T: Clone,
    {
        self.row.ensure_same_size(values, "row assignment")?;
        self.row.clone_from(values);
        Ok(())
    }
}

impl<'a, T> Deref for RowMut<'a, T> {
    type Target = DynamicVector<T>;

    fn deref(&self) -> &Self::Target {
        &*self.row
    }
}

impl<'a, T> Index<usize> for RowMut<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.row[index]
    }
}

impl<'a, T> IndexMut<usize> for RowMut<'a, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.row[index]
    }
}

impl<T> Index<usize> for DynamicMatrix<T> {
    type Output = DynamicVector<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<T> Index<(usize, usize)> for DynamicMatrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.rows[index.0][index.1]
    }
}

impl<T> IndexMut<(usize, usize)> for DynamicMatrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.rows[index.0][index.1]
    }
}

impl<'a, T: Clone + Mul<Output = T>> Mul<T> for &'a DynamicMatrix<T> {
    type Output = DynamicMatrix<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.mul_scalar(&rhs)
    }
}

impl<'a, 'b, T: Clone + Zero + Mul<Output = T>> Mul<&'b DynamicVector<T>> for &'a DynamicMatrix<T> {
    type Output = Result<DynamicVector<T>>;

    fn mul(self, rhs: &'b DynamicVector<T>) -> Self::Output {
        self.mul_vector(rhs)
    }
}

impl<'a, 'b, T: Clone + Zero + Mul<Output = T>> Mul<&'b DynamicMatrix<T>> for &'a DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn mul(self, rhs: &'b DynamicMatrix<T>) -> Self::Output {
        self.matmul(rhs)
    }
}

impl<'a, 'b, T: Clone + Add<Output = T>> Add<&'b DynamicMatrix<T>> for &'a DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn add(self, rhs: &'b DynamicMatrix<T>) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b, T: Clone + Sub<Output = T>> Sub<&'b DynamicMatrix<T>> for &'a DynamicMatrix<T> {
    type Output = Result<DynamicMatrix<T>>;

    fn sub(self, rhs: &'b DynamicMatrix<T>) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<T: fmt::Display> fmt::Display for DynamicMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
