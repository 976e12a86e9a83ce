use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, AssetId, FixedBytes};

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct AccountNameEqLitPredicate {
    pub account_id: AccountId,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct AssetSymbolEqLitPredicate {
    pub asset_id: AssetId,
    pub symbol: String,
}

/// Holds when the given block id is part of the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct BlockIdPredicate {
    pub id: FixedBytes<20>,
}

static_variant! {
    /// A condition checked by `assert` operations.
    pub enum Predicate {
        0 => AccountNameEqLit(AccountNameEqLitPredicate),
        1 => AssetSymbolEqLit(AssetSymbolEqLitPredicate),
        2 => BlockId(BlockIdPredicate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};

    #[test]
    fn predicate_test() {
        let predicate = Predicate::from(AssetSymbolEqLitPredicate {
            asset_id: AssetId::new(0),
            symbol: String::from("BTS"),
        });
        let bytes = to_bytes(&predicate).unwrap();
        assert_eq!(bytes, vec![1, 0, 3, b'B', b'T', b'S']);
        assert_eq!(from_bytes::<Predicate>(&bytes).unwrap(), predicate);

        let block = Predicate::from(BlockIdPredicate {
            id: FixedBytes([0xab; 20]),
        });
        assert_eq!(to_bytes(&block).unwrap().len(), 21);
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.starts_with(r#"[2,{"id":"abab"#));
    }
}
