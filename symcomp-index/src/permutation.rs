//! Permutations and their parity

use std::ops::{Mul, Neg};

/// Sign of a permutation, or of a component relative to its stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Multiply `value` by this sign
    pub fn apply<T: Neg<Output = T>>(self, value: T) -> T {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    pub fn is_plus(self) -> bool {
        self == Sign::Plus
    }
}

impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }
}

/// Sign of the permutation which sorts `values` in ascending order
///
/// Returns `None` if two values coincide.
///
/// ```
/// use symcomp_index::{sorting_sign, Sign};
///
/// assert_eq!(sorting_sign(&[0, 1, 2]), Some(Sign::Plus));
/// assert_eq!(sorting_sign(&[1, 0, 2]), Some(Sign::Minus));
/// assert_eq!(sorting_sign(&[2, 0, 1]), Some(Sign::Plus));
/// assert_eq!(sorting_sign(&[2, 0, 2]), None);
/// ```
pub fn sorting_sign(values: &[usize]) -> Option<Sign> {
    let mut sign = Sign::Plus;
    for (k, a) in values.iter().enumerate() {
        for b in &values[k + 1..] {
            if a == b {
                return None;
            }
            if a > b {
                sign = -sign;
            }
        }
    }
    Some(sign)
}

/// `n!` as a signed integer, or `None` on overflow
pub fn factorial(n: usize) -> Option<i64> {
    (2..=n).try_fold(1_i64, |acc, k| acc.checked_mul(i64::try_from(k).ok()?))
}

/// All permutations of `0..n` together with their sign, by Heap's algorithm
///
/// Consecutive permutations differ by a single transposition,
/// so the sign alternates along the sequence.
///
/// ```
/// use symcomp_index::{Permutations, Sign};
///
/// let perms: Vec<_> = Permutations::new(3).collect();
/// assert_eq!(perms.len(), 6);
/// assert_eq!(perms[0], (vec![0, 1, 2], Sign::Plus));
/// assert_eq!(perms[1], (vec![1, 0, 2], Sign::Minus));
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    counters: Vec<usize>,
    level: usize,
    sign: Sign,
    started: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Permutations {
            current: (0..n).collect(),
            counters: vec![0; n],
            level: 1,
            sign: Sign::Plus,
            started: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = (Vec<usize>, Sign);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some((self.current.clone(), self.sign));
        }
        let n = self.current.len();
        while self.level < n {
            let i = self.level;
            if self.counters[i] < i {
                if i % 2 == 0 {
                    self.current.swap(0, i);
                } else {
                    self.current.swap(self.counters[i], i);
                }
                self.counters[i] += 1;
                self.level = 1;
                self.sign = -self.sign;
                return Some((self.current.clone(), self.sign));
            }
            self.counters[i] = 0;
            self.level += 1;
        }
        None
    }
}
