//! Discriminated values
//!
//! Fixed-alternative tagged unions. Each `TaggedN` holds exactly one of `N`
//! alternatives; the live one is reported by [`Tagged2::id`] and reached
//! through `get::<I>()`. Asking for an alternative that is not live is a
//! contract violation and panics: the graph code that calls `get` is written
//! assuming the tag was already established, so there is nothing sensible to
//! recover into.
//!
//! `Option` covers the `Just`/`Nothing` shape and [`Either`] the two-sided
//! one; the numbered unions are for payloads with more alternatives, e.g. a
//! screen mode that can be a clock face, a menu or a notification.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Typed access to alternative `I` of a discriminated value
pub trait Alternative<const I: usize>: Sized {
    /// Payload stored by alternative `I`
    type Payload;

    /// Build the value with alternative `I` live
    fn inject(value: Self::Payload) -> Self;

    /// Borrow the payload if alternative `I` is live
    fn project(&self) -> Option<&Self::Payload>;

    /// Mutably borrow the payload if alternative `I` is live
    fn project_mut(&mut self) -> Option<&mut Self::Payload>;

    /// Take the payload if alternative `I` is live, otherwise hand the value back
    fn project_into(self) -> Result<Self::Payload, Self>;
}

#[cold]
#[track_caller]
fn wrong_alternative(kind: &'static str, wanted: usize, live: u8) -> ! {
    panic!(
        "{}: alternative {} accessed while alternative {} is live",
        kind, wanted, live
    )
}

macro_rules! tagged_alternative {
    ($name:ident ($($all:ident),+) $idx:tt $variant:ident $ty:ident) => {
        impl<$($all),+> Alternative<$idx> for $name<$($all),+> {
            type Payload = $ty;

            fn inject(value: $ty) -> Self {
                Self::$variant(value)
            }

            fn project(&self) -> Option<&$ty> {
                match self {
                    Self::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn project_mut(&mut self) -> Option<&mut $ty> {
                match self {
                    Self::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn project_into(self) -> Result<$ty, Self> {
                match self {
                    Self::$variant(value) => Ok(value),
                    other => Err(other),
                }
            }
        }
    };
}

macro_rules! tagged {
    (
        $(#[$meta:meta])*
        $name:ident $generics:tt, $arity:expr;
        $($idx:tt => $variant:ident($ty:ident)),+ $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name<$($ty),+> {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )+
        }

        impl<$($ty),+> $name<$($ty),+> {
            /// Number of alternatives
            pub const ARITY: u8 = $arity;

            /// Tag of the live alternative, in `0..ARITY`
            pub fn id(&self) -> u8 {
                match self {
                    $(Self::$variant(_) => $idx,)+
                }
            }

            /// Build the value with alternative `I` live
            pub fn create<const I: usize>(value: <Self as Alternative<I>>::Payload) -> Self
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::inject(value)
            }

            /// Check whether alternative `I` is live
            pub fn is<const I: usize>(&self) -> bool
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::project(self).is_some()
            }

            /// Borrow the payload of alternative `I`
            ///
            /// # Panics
            ///
            /// If alternative `I` is not the live one.
            #[track_caller]
            pub fn get<const I: usize>(&self) -> &<Self as Alternative<I>>::Payload
            where
                Self: Alternative<I>,
            {
                match <Self as Alternative<I>>::project(self) {
                    Some(value) => value,
                    None => wrong_alternative(stringify!($name), I, self.id()),
                }
            }

            /// Mutably borrow the payload of alternative `I`
            ///
            /// # Panics
            ///
            /// If alternative `I` is not the live one.
            #[track_caller]
            pub fn get_mut<const I: usize>(&mut self) -> &mut <Self as Alternative<I>>::Payload
            where
                Self: Alternative<I>,
            {
                let live = self.id();
                match <Self as Alternative<I>>::project_mut(self) {
                    Some(value) => value,
                    None => wrong_alternative(stringify!($name), I, live),
                }
            }

            /// Borrow the payload of alternative `I` if it is live
            pub fn try_get<const I: usize>(&self) -> Option<&<Self as Alternative<I>>::Payload>
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::project(self)
            }

            /// Consume the value and return the payload of alternative `I`
            ///
            /// # Panics
            ///
            /// If alternative `I` is not the live one.
            #[track_caller]
            pub fn into_inner<const I: usize>(self) -> <Self as Alternative<I>>::Payload
            where
                Self: Alternative<I>,
            {
                match <Self as Alternative<I>>::project_into(self) {
                    Ok(value) => value,
                    Err(other) => wrong_alternative(stringify!($name), I, other.id()),
                }
            }

            /// Replace the value with alternative `I`, dropping the old payload first
            pub fn set<const I: usize>(&mut self, value: <Self as Alternative<I>>::Payload)
            where
                Self: Alternative<I>,
            {
                *self = <Self as Alternative<I>>::inject(value);
            }
        }

        $(tagged_alternative!($name $generics $idx $variant $ty);)+
    };
}

tagged! {
    /// Two-alternative discriminated value
    Tagged2 (T0, T1), 2;
    0 => A(T0),
    1 => B(T1),
}

tagged! {
    /// Three-alternative discriminated value
    Tagged3 (T0, T1, T2), 3;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
}

tagged! {
    /// Four-alternative discriminated value
    Tagged4 (T0, T1, T2, T3), 4;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
}

tagged! {
    /// Five-alternative discriminated value
    Tagged5 (T0, T1, T2, T3, T4), 5;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
}

tagged! {
    /// Six-alternative discriminated value
    Tagged6 (T0, T1, T2, T3, T4, T5), 6;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
}

tagged! {
    /// Seven-alternative discriminated value
    Tagged7 (T0, T1, T2, T3, T4, T5, T6), 7;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
}

tagged! {
    /// Eight-alternative discriminated value
    Tagged8 (T0, T1, T2, T3, T4, T5, T6, T7), 8;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
    7 => H(T7),
}

tagged! {
    /// Nine-alternative discriminated value
    Tagged9 (T0, T1, T2, T3, T4, T5, T6, T7, T8), 9;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
    7 => H(T7),
    8 => I(T8),
}

tagged! {
    /// Ten-alternative discriminated value
    Tagged10 (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9), 10;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
    7 => H(T7),
    8 => I(T8),
    9 => J(T9),
}

tagged! {
    /// Eleven-alternative discriminated value
    Tagged11 (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10), 11;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
    7 => H(T7),
    8 => I(T8),
    9 => J(T9),
    10 => K(T10),
}

tagged! {
    /// Twelve-alternative discriminated value
    Tagged12 (T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11), 12;
    0 => A(T0),
    1 => B(T1),
    2 => C(T2),
    3 => D(T3),
    4 => E(T4),
    5 => F(T5),
    6 => G(T6),
    7 => H(T7),
    8 => I(T8),
    9 => J(T9),
    10 => K(T10),
    11 => L(T11),
}

/// Value that is one of two things
///
/// Produced by [`crate::signal::join`] to tell which side of a merge fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Either<L, R> {
    /// Left alternative
    Left(L),
    /// Right alternative
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Check if the left alternative is live
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Check if the right alternative is live
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Left payload, if live
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Right payload, if live
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Borrow both sides
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the left payload
    pub fn map_left<T, F: FnOnce(L) -> T>(self, f: F) -> Either<T, R> {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right payload
    pub fn map_right<T, F: FnOnce(R) -> T>(self, f: F) -> Either<L, T> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Collapse both sides into one type
    pub fn either<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Swap the sides
    pub fn flip(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }
}

impl<L, R> From<Either<L, R>> for Tagged2<L, R> {
    fn from(value: Either<L, R>) -> Self {
        match value {
            Either::Left(l) => Tagged2::A(l),
            Either::Right(r) => Tagged2::B(r),
        }
    }
}

impl<L, R> From<Tagged2<L, R>> for Either<L, R> {
    fn from(value: Tagged2<L, R>) -> Self {
        match value {
            Tagged2::A(l) => Either::Left(l),
            Tagged2::B(r) => Either::Right(r),
        }
    }
}
