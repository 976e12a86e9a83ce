//! Operation extensions.
//!
//! Most operations carry a `future_extensions` list that is always empty on
//! the live chain. A few carry a typed extension set: every member is
//! optional, and the set is written as the number of present members
//! followed by `(uvarint member index, value)` for each, in index order.
use std::io::{Read, Write};

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::types::{BuybackOptions, SpecialAuthority};
use crate::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct VoidExtension {}

static_variant! {
    pub enum FutureExtension {
        0 => Void(VoidExtension),
    }
}

pub type Extensions = Vec<FutureExtension>;

macro_rules! extension_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($index:literal => $field:ident: $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl $name {
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }
        }

        impl Marshal for $name {
            fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
                let present = 0u64 $(+ self.$field.is_some() as u64)+;
                enc.encode_uvarint(present)?;
                $(
                    if let Some(value) = &self.$field {
                        enc.encode_uvarint($index)?;
                        value.marshal(enc).map_err(|e| {
                            e.context(concat!("encode ", stringify!($name), ".", stringify!($field)))
                        })?;
                    }
                )+
                Ok(())
            }
        }

        impl Unmarshal for $name {
            fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
                let mut set = $name::default();
                let count = dec.decode_uvarint()?;
                let mut previous: Option<u64> = None;
                for _ in 0..count {
                    let index = dec.decode_uvarint()?;
                    if previous.map_or(false, |p| index <= p) {
                        return Err(Error::InvalidData(format!(
                            "{} members out of order at index {}",
                            stringify!($name),
                            index
                        )));
                    }
                    previous = Some(index);
                    match index {
                        $(
                            $index => {
                                set.$field = Some(Unmarshal::unmarshal(dec).map_err(|e| {
                                    e.context(concat!(
                                        "decode ", stringify!($name), ".", stringify!($field)
                                    ))
                                })?);
                            }
                        )+
                        other => {
                            return Err(Error::InvalidData(format!(
                                "unknown {} member {}",
                                stringify!($name),
                                other
                            )));
                        }
                    }
                }
                Ok(set)
            }
        }
    };
}

extension_set! {
    pub struct AccountCreateExtensions {
        0 => null_ext: VoidExtension,
        1 => owner_special_authority: SpecialAuthority,
        2 => active_special_authority: SpecialAuthority,
        3 => buyback_options: BuybackOptions,
    }
}

extension_set! {
    pub struct AccountUpdateExtensions {
        0 => null_ext: VoidExtension,
        1 => owner_special_authority: SpecialAuthority,
        2 => active_special_authority: SpecialAuthority,
    }
}

extension_set! {
    pub struct CallOrderUpdateExtensions {
        0 => target_collateral_ratio: u16,
    }
}
