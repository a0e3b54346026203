//! Capturable argument values and the tuples that carry them.
//!
//! A [`Token`] is anything a call site may hand to `record`. The tuple
//! of tokens captured at one call site is a [`TokenList`]; its concrete
//! type is what distinguishes one entry variant from another.

use smallvec::SmallVec;

use crate::arg::Arg;

/// Positional arguments of one entry, built on demand during replay.
///
/// Inline capacity covers the common case so replay of up to eight
/// arguments does not touch the heap.
pub type ArgList<'a> = SmallVec<[Arg<'a>; 8]>;

/// A value that can be captured now and presented as an [`Arg`] later.
pub trait Token {
    /// The replay-time view of this value.
    fn to_arg(&self) -> Arg<'_>;
}

macro_rules! impl_signed_token {
    ($($ty:ty),*) => {
        $(impl Token for $ty {
            fn to_arg(&self) -> Arg<'_> {
                Arg::Int(*self as i64)
            }
        })*
    };
}

macro_rules! impl_unsigned_token {
    ($($ty:ty),*) => {
        $(impl Token for $ty {
            fn to_arg(&self) -> Arg<'_> {
                Arg::UInt(*self as u64)
            }
        })*
    };
}

impl_signed_token!(i8, i16, i32, i64, isize);
impl_unsigned_token!(u8, u16, u32, u64, usize);

impl Token for bool {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Int(i64::from(*self))
    }
}

impl Token for f32 {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Float(f64::from(*self))
    }
}

impl Token for f64 {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Float(*self)
    }
}

impl Token for char {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Char(*self)
    }
}

impl Token for str {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl Token for String {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Str(self.as_str())
    }
}

impl<T: ?Sized> Token for *const T {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Ptr(self.cast::<()>() as usize)
    }
}

impl<T: ?Sized> Token for *mut T {
    fn to_arg(&self) -> Arg<'_> {
        Arg::Ptr(self.cast::<()>() as usize)
    }
}

impl<T: Token + ?Sized> Token for &T {
    fn to_arg(&self) -> Arg<'_> {
        (**self).to_arg()
    }
}

/// The ordered tuple of tokens captured by one `record` call.
///
/// Implemented for tuples of up to twelve [`Token`]s, including the
/// empty tuple for format strings without conversions.
pub trait TokenList {
    /// Number of tokens in the tuple.
    const ARITY: usize;

    /// Append the replay view of every token, in capture order.
    fn push_args<'s>(&'s self, out: &mut ArgList<'s>);

    /// Collect the replay view of every token into a fresh list.
    fn to_args(&self) -> ArgList<'_> {
        let mut out = ArgList::new();
        self.push_args(&mut out);
        out
    }
}

impl TokenList for () {
    const ARITY: usize = 0;

    fn push_args<'s>(&'s self, _out: &mut ArgList<'s>) {}
}

macro_rules! impl_token_list {
    ($($T:ident $v:ident),+) => {
        impl<$($T: Token),+> TokenList for ($($T,)+) {
            const ARITY: usize = <[&str]>::len(&[$(stringify!($T)),+]);

            fn push_args<'s>(&'s self, out: &mut ArgList<'s>) {
                let ($($v,)+) = self;
                $(out.push($v.to_arg());)+
            }
        }
    };
}

impl_token_list!(A a);
impl_token_list!(A a, B b);
impl_token_list!(A a, B b, C c);
impl_token_list!(A a, B b, C c, D d);
impl_token_list!(A a, B b, C c, D d, E e);
impl_token_list!(A a, B b, C c, D d, E e, F f);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g, H h);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
impl_token_list!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_by_signedness() {
        assert_eq!((-5i8).to_arg(), Arg::Int(-5));
        assert_eq!(7u16.to_arg(), Arg::UInt(7));
        assert_eq!(usize::MAX.to_arg(), Arg::UInt(u64::MAX));
        assert_eq!(true.to_arg(), Arg::Int(1));
    }

    #[test]
    fn f32_promotes_to_f64() {
        assert_eq!(1.5f32.to_arg(), Arg::Float(1.5));
    }

    #[test]
    fn strings_borrow_their_contents() {
        let owned = String::from("owned");
        assert_eq!(owned.to_arg(), Arg::Str("owned"));
        assert_eq!("lit".to_arg(), Arg::Str("lit"));
        assert_eq!((&&"nested").to_arg(), Arg::Str("nested"));
    }

    #[test]
    fn pointers_expose_their_address() {
        let value = 9u32;
        let ptr: *const u32 = &value;
        assert_eq!(ptr.to_arg(), Arg::Ptr(ptr as usize));
        let null: *const u8 = std::ptr::null();
        assert_eq!(null.to_arg(), Arg::Ptr(0));
    }

    #[test]
    fn tuples_report_arity() {
        assert_eq!(<() as TokenList>::ARITY, 0);
        assert_eq!(<(i32,) as TokenList>::ARITY, 1);
        assert_eq!(<(i32, &str, f64) as TokenList>::ARITY, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as TokenList>::ARITY,
            12
        );
    }

    #[test]
    fn tuple_args_keep_capture_order() {
        let tokens = (1i32, "two", 3.0f64, 'x');
        let args = tokens.to_args();
        assert_eq!(
            args.as_slice(),
            &[Arg::Int(1), Arg::Str("two"), Arg::Float(3.0), Arg::Char('x')]
        );
        assert!(!args.spilled());
    }

    #[test]
    fn empty_tuple_has_no_args() {
        assert!(().to_args().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn signed_tokens_preserve_value(v in any::<i64>()) {
                prop_assert_eq!(v.to_arg(), Arg::Int(v));
            }

            #[test]
            fn pair_args_match_components(a in any::<i32>(), b in any::<u32>()) {
                let pair = (a, b);
                let args = pair.to_args();
                prop_assert_eq!(args.len(), 2);
                prop_assert_eq!(args[0], Arg::Int(i64::from(a)));
                prop_assert_eq!(args[1], Arg::UInt(u64::from(b)));
            }
        }
    }
}
