//! Small function-level building blocks used to derive combinators.

/// Returns its argument unchanged.
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// A function that ignores its argument and returns a clone of `value`.
///
/// ```rust
/// use taskchain::functions::constant;
///
/// let always_seven = constant(7);
/// assert_eq!(always_seven("ignored"), 7);
/// ```
#[inline]
pub fn constant<T, A>(value: T) -> impl Fn(A) -> T + Clone
where
    T: Clone,
{
    move |_| value.clone()
}

/// Left-to-right composition: `pipe2(f, g)(x) == g(f(x))`.
///
/// ```rust
/// use taskchain::functions::pipe2;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let normalize = pipe2(|s: &str| s.trim().to_string(), |s: String| s.to_lowercase());
/// let name = fulfilled("  Ada ").map(normalize).run().await.unwrap();
/// assert_eq!(name, "ada");
/// # });
/// ```
#[inline]
pub fn pipe2<A, B, C, F, G>(f: F, g: G) -> impl FnOnce(A) -> C
where
    F: FnOnce(A) -> B,
    G: FnOnce(B) -> C,
{
    move |value| g(f(value))
}

/// Turn a consumer into a function that returns its argument after the
/// consumer has seen it.
///
/// ```rust
/// use taskchain::functions::tap;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let value = fulfilled(4)
///     .map(tap(|x: &i32| println!("loaded {x}")))
///     .run()
///     .await
///     .unwrap();
/// assert_eq!(value, 4);
/// # });
/// ```
#[inline]
pub fn tap<T, F>(consumer: F) -> impl FnOnce(T) -> T
where
    F: FnOnce(&T),
{
    move |value| {
        consumer(&value);
        value
    }
}

/// Call a supplier.
///
/// ```rust
/// use taskchain::functions::invoke;
///
/// let fields = invoke(|| "id,name,email".split(',').count());
/// assert_eq!(fields, 3);
/// ```
#[inline]
pub fn invoke<T, F>(supplier: F) -> T
where
    F: FnOnce() -> T,
{
    supplier()
}
