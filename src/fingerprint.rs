use crate::tree::Tree;
use crate::value::Value;
use sha2::{Digest, Sha256};

fn write_value_canonical(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Int(v) => {
            buf.push(0x01);
            buf.extend_from_slice(&v.to_be_bytes());
        }
        Value::UInt(v) => {
            buf.push(0x07);
            buf.extend_from_slice(&v.to_be_bytes());
        }
        Value::Float(v) => {
            buf.push(0x02);
            buf.extend_from_slice(&v.to_bits().to_be_bytes());
        }
        Value::Bool(v) => {
            buf.push(0x03);
            buf.push(if *v { 0x01 } else { 0x00 });
        }
        Value::Str(v) => {
            buf.push(0x04);
            write_str(buf, v);
        }
        Value::List(values) => {
            buf.push(0x05);
            let len = values.len() as u64;
            buf.extend_from_slice(&len.to_be_bytes());
            for item in values {
                write_value_canonical(buf, item);
            }
        }
        Value::Map(map) => {
            // BTreeMap iteration is already key-ordered
            buf.push(0x06);
            let len = map.len() as u64;
            buf.extend_from_slice(&len.to_be_bytes());
            for (key, item) in map {
                write_str(buf, key);
                write_value_canonical(buf, item);
            }
        }
    }
}

fn write_str(buf: &mut Vec<u8>, s: &str) {
    let len = s.len() as u64;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

pub fn compute_value_hash(value: &Value) -> [u8; 32] {
    let mut bytes = Vec::new();
    write_value_canonical(&mut bytes, value);

    let digest = Sha256::digest(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

impl Tree {
    pub fn fingerprint(&self) -> [u8; 32] {
        compute_value_hash(&self.export())
    }
}
