use std::fmt;
use std::io::{BufRead, Write};
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::slice::{Iter, IterMut};
use std::str::FromStr;

use num_traits::Zero;

use crate::config::Limits;
use crate::error::{check_index, check_size, LinalgError, Result};
use crate::io::TokenReader;

/// Fixed-length vector that owns its heap buffer.
///
/// The length is chosen at construction and never changes afterwards; a
/// vector is only resized by replacing it as a whole. Every element access,
/// including `v[i]`, is bounds-checked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DynamicVector<T> {
    data: Box<[T]>,
}

impl<T: Default> DynamicVector<T> {
    /// Allocate `size` default-initialized elements.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_limits(size, &Limits::default())
    }

    pub fn with_limits(size: usize, limits: &Limits) -> Result<Self> {
        check_size(size, limits.max_vector_size())?;
        log::trace!("Allocating vector of {} elements", size);
        Ok(Self::from_boxed((0..size).map(|_| T::default()).collect()))
    }
}

impl<T: Default> Default for DynamicVector<T> {
    fn default() -> Self {
        Self::from_boxed(vec![T::default()].into_boxed_slice())
    }
}

impl<T: Clone> DynamicVector<T> {
    /// Copy the first `length` elements of `buffer` into a new vector.
    ///
    /// A buffer holding fewer than `length` elements is reported as
    /// [`LinalgError::ContractViolation`].
    pub fn from_buffer(buffer: &[T], length: usize) -> Result<Self> {
        Self::from_buffer_with_limits(buffer, length, &Limits::default())
    }

    pub fn from_buffer_with_limits(buffer: &[T], length: usize, limits: &Limits) -> Result<Self> {
        if buffer.len() < length {
            return Err(LinalgError::ContractViolation(format!(
                "buffer holds {} elements but {} were requested",
                buffer.len(),
                length
            )));
        }
        check_size(length, limits.max_vector_size())?;
        Ok(Self::from_boxed(buffer[..length].into()))
    }
}

impl<T> DynamicVector<T> {
    /// Adopt `data` as the vector's storage after checking its length
    /// against `limits`.
    pub fn from_vec_with_limits(data: Vec<T>, limits: &Limits) -> Result<Self> {
        check_size(data.len(), limits.max_vector_size())?;
        Ok(Self::from_boxed(data.into_boxed_slice()))
    }

    pub(crate) fn from_boxed(data: Box<[T]>) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        check_index(index, self.size())?;
        Ok(&self.data[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.size())?;
        Ok(&mut self.data[index])
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Exchange contents with `other` without copying elements.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.data, &mut other.data);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data.into_vec()
    }

    pub(crate) fn map<U, F>(&self, f: F) -> DynamicVector<U>
    where
        F: FnMut(&T) -> U,
    {
        DynamicVector::from_boxed(self.data.iter().map(f).collect())
    }

    pub(crate) fn ensure_same_size<U>(&self, other: &DynamicVector<U>, op: &str) -> Result<()> {
        if self.size() != other.size() {
            log::debug!(
                "Rejected vector {}: sizes {} and {} differ",
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

    fn zip_with<F>(&self, other: &Self, op: &str, mut f: F) -> Result<Self>
    where
        F: FnMut(&T, &T) -> T,
    {
        self.ensure_same_size(other, op)?;
        Ok(Self::from_boxed(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        ))
    }
}

impl<T: Clone + Add<Output = T>> DynamicVector<T> {
    pub fn add_scalar(&self, value: &T) -> Self {
        self.map(|x| x.clone() + value.clone())
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "addition", |a, b| a.clone() + b.clone())
    }
}

impl<T: Clone + Sub<Output = T>> DynamicVector<T> {
    pub fn sub_scalar(&self, value: &T) -> Self {
        self.map(|x| x.clone() - value.clone())
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "subtraction", |a, b| a.clone() - b.clone())
    }
}

impl<T: Clone + Mul<Output = T>> DynamicVector<T> {
    pub fn mul_scalar(&self, value: &T) -> Self {
        self.map(|x| x.clone() * value.clone())
    }
}

impl<T: Clone + Zero + Mul<Output = T>> DynamicVector<T> {
    /// Inner product `Σ self[i] * other[i]`.
    ///
    /// Accumulation starts at `T::zero()` and walks the indices in
    /// increasing order as `acc = acc + self[i] * other[i]`, so the result
    /// is well defined for element types whose `+` or `*` do not commute.
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.ensure_same_size(other, "dot product")?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }
}

impl<T: FromStr> DynamicVector<T>
where
    T::Err: fmt::Display,
{
    /// Replace every element with the next `size()` tokens of `input`.
    ///
    /// The vector is left untouched when the input is short or a token
    /// fails to parse.
    pub fn read_from<R: BufRead>(&mut self, input: &mut TokenReader<R>) -> Result<()> {
        *self = Self::read_new(input, self.size())?;
        Ok(())
    }

    pub(crate) fn read_new<R: BufRead>(input: &mut TokenReader<R>, size: usize) -> Result<Self> {
        let values = input.parse_n::<T>(size)?;
        Ok(Self::from_boxed(values.into_boxed_slice()))
    }

    pub fn read_str(&mut self, input: &str) -> Result<()> {
        self.read_from(&mut TokenReader::from_text(input))
    }
}

impl<T: fmt::Display> DynamicVector<T> {
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        Ok(())
    }
}

/// Checks the length against `Limits::default()`; use
/// [`DynamicVector::from_vec_with_limits`] for other bounds.
impl<T> TryFrom<Vec<T>> for DynamicVector<T> {
    type Error = LinalgError;

    fn try_from(data: Vec<T>) -> Result<Self> {
        Self::from_vec_with_limits(data, &Limits::default())
    }
}

impl<T> From<DynamicVector<T>> for Vec<T> {
    fn from(value: DynamicVector<T>) -> Self {
        value.into_vec()
    }
}

impl<'a, T> IntoIterator for &'a DynamicVector<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for DynamicVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for DynamicVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Clone + Add<Output = T>> Add<T> for &'a DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn add(self, rhs: T) -> Self::Output {
        self.add_scalar(&rhs)
    }
}

impl<'a, T: Clone + Sub<Output = T>> Sub<T> for &'a DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn sub(self, rhs: T) -> Self::Output {
        self.sub_scalar(&rhs)
    }
}

impl<'a, T: Clone + Mul<Output = T>> Mul<T> for &'a DynamicVector<T> {
    type Output = DynamicVector<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.mul_scalar(&rhs)
    }
}

impl<'a, 'b, T: Clone + Add<Output = T>> Add<&'b DynamicVector<T>> for &'a DynamicVector<T> {
    type Output = Result<DynamicVector<T>>;

    fn add(self, rhs: &'b DynamicVector<T>) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b, T: Clone + Sub<Output = T>> Sub<&'b DynamicVector<T>> for &'a DynamicVector<T> {
    type Output = Result<DynamicVector<T>>;

    fn sub(self, rhs: &'b DynamicVector<T>) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<'a, 'b, T: Clone + Zero + Mul<Output = T>> Mul<&'b DynamicVector<T>> for &'a DynamicVector<T> {
    type Output = Result<T>;

    fn mul(self, rhs: &'b DynamicVector<T>) -> Self::Output {
        self.dot(rhs)
    }
}

impl<T: fmt::Display> fmt::Display for DynamicVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.data.iter().enumerate() {
            if idx != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
