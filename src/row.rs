//! Whole-row appends.
//!
//! [`EncodeRow`] lets a typed record be appended in one call, and is what the
//! file helpers in [`io::tsv`](crate::io::tsv) consume. It is implemented for
//! tuples of up to twelve [`ToLoadValue`] elements and for slices of [`Value`].

use crate::encoder::Encoder;
use crate::value::{ToLoadValue, Value};
use std::io::Write;

/// A record that can append its fields to an [`Encoder`].
pub trait EncodeRow {
    /// Number of fields [`append_to`](Self::append_to) appends.
    fn column_count(&self) -> usize;

    /// Append every field in column order.
    fn append_to<W: Write>(&self, enc: &mut Encoder<W>);
}

impl<R: EncodeRow + ?Sized> EncodeRow for &R {
    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    fn append_to<W: Write>(&self, enc: &mut Encoder<W>) {
        (**self).append_to(enc);
    }
}

impl EncodeRow for [Value<'_>] {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn append_to<W: Write>(&self, enc: &mut Encoder<W>) {
        for v in self {
            enc.append_value(v);
        }
    }
}

impl EncodeRow for Vec<Value<'_>> {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn append_to<W: Write>(&self, enc: &mut Encoder<W>) {
        self.as_slice().append_to(enc);
    }
}

macro_rules! impl_tuple_row {
    ($n:expr; $($name:ident . $idx:tt),+) => {
        impl<$($name: ToLoadValue),+> EncodeRow for ($($name,)+) {
            fn column_count(&self) -> usize {
                $n
            }

            fn append_to<W: Write>(&self, enc: &mut Encoder<W>) {
                $( enc.append_value(&self.$idx); )+
            }
        }
    };
}

impl_tuple_row!(1; A.0);
impl_tuple_row!(2; A.0, B.1);
impl_tuple_row!(3; A.0, B.1, C.2);
impl_tuple_row!(4; A.0, B.1, C.2, D.3);
impl_tuple_row!(5; A.0, B.1, C.2, D.3, E.4);
impl_tuple_row!(6; A.0, B.1, C.2, D.3, E.4, F.5);
impl_tuple_row!(7; A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_tuple_row!(8; A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
impl_tuple_row!(9; A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
impl_tuple_row!(10; A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
impl_tuple_row!(11; A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
impl_tuple_row!(12; A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);
