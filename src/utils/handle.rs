use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

pub type HandleIndex = u32;

/// A slot in an arena, plus the generation of that slot at the time the
/// handle was made. Slots are recycled, so the `version` is what tells a live
/// object apart from a released one that happened to live at the same index.
///
/// Versions handed out by `HandlePool` are odd. `(0, 0)` is the nil handle and
/// never names anything.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    index: HandleIndex,
    version: HandleIndex,
}

impl Handle {
    #[inline]
    pub fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle { index, version }
    }

    #[inline]
    pub fn nil() -> Self {
        Handle::default()
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self.version == 0
    }

    #[inline]
    pub fn index(self) -> HandleIndex {
        self.index
    }

    #[inline]
    pub fn version(self) -> HandleIndex {
        self.version
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle ({}, {})", self.index, self.version)
    }
}

/// Anything that can be minted by a `HandlePool`.
pub trait HandleLike: Debug + Copy + Hash + PartialEq + Eq + Send + Sync {
    fn new(index: HandleIndex, version: HandleIndex) -> Self;
    fn index(&self) -> HandleIndex;
    fn version(&self) -> HandleIndex;
}

impl HandleLike for Handle {
    #[inline]
    fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle { index, version }
    }

    #[inline]
    fn index(&self) -> HandleIndex {
        self.index
    }

    #[inline]
    fn version(&self) -> HandleIndex {
        self.version
    }
}

/// Declares a handle type that can only name one kind of object, so a
/// `BufferHandle` can never be passed where a `TextureHandle` is expected.
/// The handle is `Display`ed with its type name, which is what shows up in
/// logs about stale handles.
#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::utils::handle::Handle);

        impl $name {
            #[inline]
            pub fn nil() -> Self {
                $name($crate::utils::handle::Handle::nil())
            }

            #[inline]
            pub fn is_nil(self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<$name> for $crate::utils::handle::Handle {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl From<$crate::utils::handle::Handle> for $name {
            fn from(handle: $crate::utils::handle::Handle) -> Self {
                $name(handle)
            }
        }

        impl $crate::utils::handle::HandleLike for $name {
            #[inline]
            fn new(
                index: $crate::utils::handle::HandleIndex,
                version: $crate::utils::handle::HandleIndex,
            ) -> Self {
                $name($crate::utils::handle::Handle::new(index, version))
            }

            #[inline]
            fn index(&self) -> $crate::utils::handle::HandleIndex {
                self.0.index()
            }

            #[inline]
            fn version(&self) -> $crate::utils::handle::HandleIndex {
                self.0.version()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(
                    f,
                    "{} ({}, {})",
                    stringify!($name),
                    self.0.index(),
                    self.0.version()
                )
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    impl_handle!(ShaderHandle);

    #[test]
    fn nil() {
        assert!(Handle::nil().is_nil());
        assert!(!Handle::new(0, 1).is_nil());
        assert_eq!(ShaderHandle::default(), ShaderHandle::nil());
        assert!(ShaderHandle::nil().is_nil());
    }

    #[test]
    fn typed() {
        let h = ShaderHandle::from(Handle::new(3, 1));
        assert_eq!(Handle::from(h), Handle::new(3, 1));
        assert_eq!(HandleLike::index(&h), 3);
        assert_eq!(format!("{}", h), "ShaderHandle (3, 1)");
        assert_eq!(format!("{}", Handle::new(3, 1)), "Handle (3, 1)");
    }
}
