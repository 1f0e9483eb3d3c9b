//! Closure combinators
//!
//! Every combinator here returns a closure whose environment embeds its
//! inputs by value, so the size of the composed closure is part of its type
//! and nothing is allocated. Closures are built while the graph is wired and
//! are not rebuilt afterwards; mutable behavior goes through a
//! [`crate::Shared`] captured in the environment.

/// Identity function
pub fn identity<T>(value: T) -> T {
    value
}

/// Function that ignores its argument and returns `value`
pub fn constant_fn<T: Clone, A>(value: T) -> impl Fn(A) -> T {
    move |_| value.clone()
}

/// `compose(f, g)(x) == f(g(x))`
pub fn compose<A, B, C>(f: impl Fn(B) -> C, g: impl Fn(A) -> B) -> impl Fn(A) -> C {
    move |x| f(g(x))
}

/// Compose a one-argument function after a two-argument one
///
/// `compose2(f, g)(x, y) == f(g(x, y))`
pub fn compose2<A, B, C, D>(f: impl Fn(C) -> D, g: impl Fn(A, B) -> C) -> impl Fn(A, B) -> D {
    move |x, y| f(g(x, y))
}

/// Turn a two-argument function into a function returning a function
pub fn curry<A: Clone, B, C, F>(f: F) -> impl Fn(A) -> Curried<A, F>
where
    F: Fn(A, B) -> C + Clone,
{
    move |a| Curried {
        first: a,
        f: f.clone(),
    }
}

/// Partially applied two-argument function produced by [`curry`]
#[derive(Debug, Clone, Copy)]
pub struct Curried<A, F> {
    first: A,
    f: F,
}

impl<A: Clone, F> Curried<A, F> {
    /// Supply the remaining argument
    pub fn call<B, C>(&self, b: B) -> C
    where
        F: Fn(A, B) -> C,
    {
        (self.f)(self.first.clone(), b)
    }
}

/// Turn a three-argument function into a chain of one-argument steps
///
/// `curry3(f)(a).call(b).call(c) == f(a, b, c)`
pub fn curry3<A: Clone, B: Clone, C, D, F>(f: F) -> impl Fn(A) -> Curried3<A, F>
where
    F: Fn(A, B, C) -> D + Clone,
{
    move |a| Curried3 {
        first: a,
        f: f.clone(),
    }
}

/// Three-argument function with the first argument supplied
#[derive(Debug, Clone, Copy)]
pub struct Curried3<A, F> {
    first: A,
    f: F,
}

impl<A: Clone, F: Clone> Curried3<A, F> {
    /// Supply the second argument
    pub fn call<B>(&self, b: B) -> Curried3Tail<A, B, F> {
        Curried3Tail {
            first: self.first.clone(),
            second: b,
            f: self.f.clone(),
        }
    }
}

/// Three-argument function waiting for its last argument
#[derive(Debug, Clone, Copy)]
pub struct Curried3Tail<A, B, F> {
    first: A,
    second: B,
    f: F,
}

impl<A: Clone, B: Clone, F> Curried3Tail<A, B, F> {
    /// Supply the last argument
    pub fn call<C, D>(&self, c: C) -> D
    where
        F: Fn(A, B, C) -> D,
    {
        (self.f)(self.first.clone(), self.second.clone(), c)
    }
}

/// Fix the first argument of a two-argument function
pub fn partial<A: Clone, B, C>(f: impl Fn(A, B) -> C, a: A) -> impl Fn(B) -> C {
    move |b| f(a.clone(), b)
}

/// Fix the first two arguments of a three-argument function
pub fn partial2<A: Clone, B: Clone, C, D>(f: impl Fn(A, B, C) -> D, a: A, b: B) -> impl Fn(C) -> D {
    move |c| f(a.clone(), b.clone(), c)
}

/// Turn a function returning a function back into a two-argument function
pub fn uncurry<A, B, C, G>(f: impl Fn(A) -> G) -> impl Fn(A, B) -> C
where
    G: Fn(B) -> C,
{
    move |a, b| f(a)(b)
}

/// Three-argument version of [`uncurry`]
pub fn uncurry3<A, B, C, D, G, H>(f: impl Fn(A) -> G) -> impl Fn(A, B, C) -> D
where
    G: Fn(B) -> H,
    H: Fn(C) -> D,
{
    move |a, b, c| f(a)(b)(c)
}

/// Take a pair instead of two arguments
pub fn tupled<A, B, C>(f: impl Fn(A, B) -> C) -> impl Fn((A, B)) -> C {
    move |(a, b)| f(a, b)
}

/// Take a triple instead of three arguments
pub fn tupled3<A, B, C, D>(f: impl Fn(A, B, C) -> D) -> impl Fn((A, B, C)) -> D {
    move |(a, b, c)| f(a, b, c)
}

/// Swap the two arguments of a function
pub fn flip<A, B, C>(f: impl Fn(A, B) -> C) -> impl Fn(B, A) -> C {
    move |b, a| f(a, b)
}

/// Apply `f` to `value`
pub fn apply<A, B>(f: impl FnOnce(A) -> B, value: A) -> B {
    f(value)
}

/// First element of a pair
pub fn fst<A, B>((a, _): (A, B)) -> A {
    a
}

/// Second element of a pair
pub fn snd<A, B>((_, b): (A, B)) -> B {
    b
}
