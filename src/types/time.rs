use std::convert::TryFrom;
use std::fmt;
use std::io::{Read, Write};
use std::ops::Add;
use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::{Error, Result};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Seconds since the Unix epoch, UTC. Four bytes on the wire, and
/// `YYYY-MM-DDTHH:MM:SS` without a zone suffix in JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePointSec(pub u32);

impl TimePointSec {
    pub fn now() -> Self {
        let secs = Utc::now().timestamp();
        TimePointSec(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    pub fn from_unix(secs: u32) -> Self {
        TimePointSec(secs)
    }

    pub fn get_unix(&self) -> u32 {
        self.0
    }

    pub fn add_seconds(&self, secs: u32) -> Self {
        TimePointSec(self.0.saturating_add(secs))
    }
}

impl Add<u32> for TimePointSec {
    type Output = TimePointSec;

    fn add(self, secs: u32) -> TimePointSec {
        self.add_seconds(secs)
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDateTime::from_timestamp_opt(self.0 as i64, 0) {
            Some(datetime) => write!(f, "{}", datetime.format(TIME_FORMAT)),
            None => Err(fmt::Error),
        }
    }
}

impl FromStr for TimePointSec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_end_matches('Z');
        let datetime = NaiveDateTime::parse_from_str(trimmed, TIME_FORMAT)
            .map_err(|e| Error::InvalidData(format!("time {:?}: {}", s, e)))?;
        let secs = u32::try_from(datetime.timestamp())
            .map_err(|_| Error::InvalidData(format!("time {:?} out of range", s)))?;
        Ok(TimePointSec(secs))
    }
}

impl Marshal for TimePointSec {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.encode_number(self.0)
    }
}

impl Unmarshal for TimePointSec {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        Ok(TimePointSec(dec.decode_number::<u32>()?))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::to_bytes;

    #[test]
    fn time_format_test() {
        let time: TimePointSec = "2016-04-06T08:29:27".parse().unwrap();
        assert_eq!(time.get_unix(), 1459931367);
        assert_eq!(time.to_string(), "2016-04-06T08:29:27");
        assert_eq!(to_bytes(&time).unwrap(), vec![0xe7, 0xc8, 0x04, 0x57]);

        let zoned: TimePointSec = "2016-04-06T08:29:27Z".parse().unwrap();
        assert_eq!(zoned, time);

        assert!("2016-04-06 08:29:27".parse::<TimePointSec>().is_err());
        assert!("1960-01-01T00:00:00".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn time_json_test() {
        let time = TimePointSec::from_unix(1136214245);
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"2006-01-02T15:04:05\"");
        assert_eq!(serde_json::from_str::<TimePointSec>(&json).unwrap(), time);
        assert_eq!((time + 30).get_unix(), 1136214275);
    }
}
