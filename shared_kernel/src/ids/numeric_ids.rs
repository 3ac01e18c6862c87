/// Declares an integer identifier issued by a remote directory.
///
/// The generated type serializes as the bare integer, so it can sit directly
/// in response DTOs.
#[macro_export]
macro_rules! numeric_key {
    ($TypeName: ident) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $TypeName(u32);

        impl $TypeName {
            pub fn new(value: u32) -> Self {
                $TypeName(value)
            }

            pub fn inner(&self) -> u32 {
                self.0
            }
        }

        impl PartialEq<u32> for $TypeName {
            fn eq(&self, other: &u32) -> bool {
                self.0 == *other
            }
        }

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u32> for $TypeName {
            fn from(id: u32) -> Self {
                $TypeName(id)
            }
        }

        impl From<$TypeName> for u32 {
            fn from(id: $TypeName) -> Self {
                id.inner()
            }
        }
    };
}
