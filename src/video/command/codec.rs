//! Fixed-width little-endian field codec used by the command stream.

use byteorder::{ByteOrder, LittleEndian};

/// Writes fields front to back into a pre-sized byte span.
pub struct Encoder<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Encoder { bytes, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn u8(&mut self, v: u8) {
        self.bytes[self.pos] = v;
        self.pos += 1;
    }

    #[inline]
    pub fn u32(&mut self, v: u32) {
        LittleEndian::write_u32(&mut self.bytes[self.pos..], v);
        self.pos += 4;
    }

    #[inline]
    pub fn i32(&mut self, v: i32) {
        LittleEndian::write_i32(&mut self.bytes[self.pos..], v);
        self.pos += 4;
    }

    #[inline]
    pub fn f32(&mut self, v: f32) {
        LittleEndian::write_f32(&mut self.bytes[self.pos..], v);
        self.pos += 4;
    }
}

/// Reads fields front to back out of a byte span.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Decoder { bytes, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn u8(&mut self) -> u8 {
        let v = self.bytes[self.pos];
        self.pos += 1;
        v
    }

    #[inline]
    pub fn u32(&mut self) -> u32 {
        let v = LittleEndian::read_u32(&self.bytes[self.pos..]);
        self.pos += 4;
        v
    }

    #[inline]
    pub fn i32(&mut self) -> i32 {
        let v = LittleEndian::read_i32(&self.bytes[self.pos..]);
        self.pos += 4;
        v
    }

    #[inline]
    pub fn f32(&mut self) -> f32 {
        let v = LittleEndian::read_f32(&self.bytes[self.pos..]);
        self.pos += 4;
        v
    }
}

/// A value with a fixed encoded size, known at compile time.
///
/// Decoding is not self-describing. The reader must already know which type
/// follows in the stream, usually from a preceding `Header`.
pub trait Field: Sized {
    const SIZE: usize;

    fn encode(&self, e: &mut Encoder);

    fn decode(d: &mut Decoder) -> Self;
}

impl Field for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn encode(&self, e: &mut Encoder) {
        e.u8(*self)
    }

    #[inline]
    fn decode(d: &mut Decoder) -> Self {
        d.u8()
    }
}

impl Field for bool {
    const SIZE: usize = 1;

    #[inline]
    fn encode(&self, e: &mut Encoder) {
        e.u8(*self as u8)
    }

    #[inline]
    fn decode(d: &mut Decoder) -> Self {
        d.u8() != 0
    }
}

impl Field for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn encode(&self, e: &mut Encoder) {
        e.u32(*self)
    }

    #[inline]
    fn decode(d: &mut Decoder) -> Self {
        d.u32()
    }
}

impl Field for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn encode(&self, e: &mut Encoder) {
        e.i32(*self)
    }

    #[inline]
    fn decode(d: &mut Decoder) -> Self {
        d.i32()
    }
}

impl Field for f32 {
    const SIZE: usize = 4;

    #[inline]
    fn encode(&self, e: &mut Encoder) {
        e.f32(*self)
    }

    #[inline]
    fn decode(d: &mut Decoder) -> Self {
        d.f32()
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn encode(&self, e: &mut Encoder) {
        for v in self.iter() {
            v.encode(e);
        }
    }

    fn decode(d: &mut Decoder) -> Self {
        ::std::array::from_fn(|_| T::decode(d))
    }
}

/// Declares a plain struct whose fields are all `Field`s, and implements
/// `Field` for it by encoding the members in declaration order.
#[macro_export]
macro_rules! impl_field_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($(#[$fmeta:meta])* pub $field:ident: $ty:ty,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            $($(#[$fmeta])* pub $field: $ty,)*
        }

        impl $crate::video::command::codec::Field for $name {
            const SIZE: usize = 0 $(+ <$ty as $crate::video::command::codec::Field>::SIZE)*;

            #[allow(unused_variables)]
            fn encode(&self, e: &mut $crate::video::command::codec::Encoder) {
                $($crate::video::command::codec::Field::encode(&self.$field, e);)*
            }

            #[allow(unused_variables)]
            fn decode(d: &mut $crate::video::command::codec::Decoder) -> Self {
                $name {
                    $($field: <$ty as $crate::video::command::codec::Field>::decode(d),)*
                }
            }
        }
    };
}

/// Implements `Field` for a fieldless enum, encoded as its `u8`
/// discriminant. Decoding an unknown discriminant is a broken stream and
/// panics.
#[macro_export]
macro_rules! impl_field_enum {
    ($name:ident { $($variant:ident = $value:literal,)* }) => {
        impl $crate::video::command::codec::Field for $name {
            const SIZE: usize = 1;

            #[inline]
            fn encode(&self, e: &mut $crate::video::command::codec::Encoder) {
                let v: u8 = match *self {
                    $($name::$variant => $value,)*
                };
                e.u8(v);
            }

            #[inline]
            fn decode(d: &mut $crate::video::command::codec::Decoder) -> Self {
                match d.u8() {
                    $($value => $name::$variant,)*
                    v => panic!("Unknown {} value {} in command stream.", stringify!($name), v),
                }
            }
        }
    };
}

/// Implements `Field` for a type-safe handle as its index and version.
#[macro_export]
macro_rules! impl_field_handle {
    ($($name:ident),*) => {
        $(
            impl $crate::video::command::codec::Field for $name {
                const SIZE: usize = 8;

                #[inline]
                fn encode(&self, e: &mut $crate::video::command::codec::Encoder) {
                    e.u32($crate::utils::handle::HandleLike::index(self));
                    e.u32($crate::utils::handle::HandleLike::version(self));
                }

                #[inline]
                fn decode(d: &mut $crate::video::command::codec::Decoder) -> Self {
                    let index = d.u32();
                    let version = d.u32();
                    $crate::utils::handle::HandleLike::new(index, version)
                }
            }
        )*
    };
}

#[cfg(test)]
mod test {
    use super::*;

    impl_field_struct! {
        pub struct Sample {
            pub flag: bool,
            pub value: i32,
            pub color: [f32; 4],
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(<[f32; 16]>::SIZE, 64);
        assert_eq!(<[[bool; 4]; 2]>::SIZE, 8);
        assert_eq!(Sample::SIZE, 1 + 4 + 16);
    }

    #[test]
    fn little_endian_layout() {
        let mut bytes = [0u8; 21];
        let v = Sample {
            flag: true,
            value: 0x0102_0304,
            color: [1.0, 0.0, 0.0, -2.5],
        };

        let mut e = Encoder::new(&mut bytes);
        v.encode(&mut e);
        assert_eq!(e.position(), Sample::SIZE);
        assert_eq!(&bytes[0..5], &[1, 4, 3, 2, 1]);

        let mut d = Decoder::new(&bytes);
        assert_eq!(Sample::decode(&mut d), v);
        assert_eq!(d.position(), Sample::SIZE);
    }
}
