/*!
# Composite Value Types

Every value object that appears inside an operation: ids, amounts, prices,
keys, authorities, memos and the various option and extension records.

Each type owns its wire order. Structs deriving `Marshal` list their fields
in the order the reference serializer writes them, which is frequently
neither alphabetical nor the natural reading order.
*/

/// Declares a Graphene `static_variant`: a closed union written as a
/// uvarint tag followed by the selected member, and represented in JSON as
/// `[tag, {member}]`.
macro_rules! static_variant {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($tag:literal => $variant:ident($inner:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $($variant($inner)),+
        }

        impl $name {
            pub fn tag(&self) -> u64 {
                match self {
                    $($name::$variant(_) => $tag),+
                }
            }
        }

        impl crate::codec::Marshal for $name {
            fn marshal<W: ::std::io::Write>(
                &self,
                enc: &mut crate::codec::Encoder<W>,
            ) -> crate::Result<()> {
                enc.encode_uvarint(self.tag())?;
                match self {
                    $($name::$variant(inner) => crate::codec::Marshal::marshal(inner, enc)
                        .map_err(|e| e.context(concat!(
                            "encode ", stringify!($name), "::", stringify!($variant)
                        )))),+
                }
            }
        }

        impl crate::codec::Unmarshal for $name {
            fn unmarshal<R: ::std::io::Read>(
                dec: &mut crate::codec::Decoder<R>,
            ) -> crate::Result<Self> {
                match dec.decode_uvarint()? {
                    $($tag => Ok($name::$variant(
                        <$inner as crate::codec::Unmarshal>::unmarshal(dec)
                            .map_err(|e| e.context(concat!(
                                "decode ", stringify!($name), "::", stringify!($variant)
                            )))?,
                    )),)+
                    other => Err(crate::Error::InvalidData(format!(
                        "unknown {} tag {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                match self {
                    $($name::$variant(inner) => ::serde::Serialize::serialize(
                        &($tag as u64, inner),
                        serializer,
                    )),+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let (tag, value): (u64, ::serde_json::Value) =
                    ::serde::Deserialize::deserialize(deserializer)?;
                match tag {
                    $($tag => ::serde_json::from_value::<$inner>(value)
                        .map($name::$variant)
                        .map_err(::serde::de::Error::custom),)+
                    other => Err(::serde::de::Error::custom(format!(
                        "unknown {} tag {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        $(
            impl From<$inner> for $name {
                fn from(inner: $inner) -> Self {
                    $name::$variant(inner)
                }
            }
        )+
    };
}

pub mod account;
pub mod asset;
pub mod authority;
pub mod blind;
pub mod buffer;
pub mod chain_parameters;
pub mod extensions;
pub mod memo;
pub mod object_id;
pub mod predicate;
pub mod public_key;
pub mod signature;
pub mod time;
pub mod vesting;

pub use account::{AccountOptions, VoteId, VoteType};
pub use asset::{AssetAmount, AssetOptions, BitassetOptions, Price, PriceFeed};
pub use authority::{
    Authority, BuybackOptions, NoSpecialAuthority, SpecialAuthority, TopHoldersSpecialAuthority,
};
pub use blind::{BlindFactor, BlindInput, BlindOutput, Commitment, StealthConfirmation};
pub use buffer::{Buffer, FixedBytes};
pub use chain_parameters::{ChainParameters, FeeEntry, FeeParameters, FeeSchedule};
pub use extensions::{
    AccountCreateExtensions, AccountUpdateExtensions, CallOrderUpdateExtensions, Extensions,
    FutureExtension, VoidExtension,
};
pub use memo::Memo;
pub use object_id::*;
pub use predicate::{
    AccountNameEqLitPredicate, AssetSymbolEqLitPredicate, BlockIdPredicate, Predicate,
};
pub use public_key::{Address, PublicKey};
pub use signature::Signature;
pub use time::TimePointSec;
pub use vesting::{
    BurnWorkerInitializer, CddVestingPolicyInitializer, InstantVestingPolicyInitializer,
    LinearVestingPolicyInitializer, RefundWorkerInitializer, VestingBalanceWorkerInitializer,
    VestingPolicyInitializer, WorkerInitializer,
};

/// Accepts an integer that arrives either as a JSON number or a string, the
/// way nodes report 64-bit amounts.
pub(crate) use serde_aux::field_attributes::deserialize_number_from_string as number_or_string;
