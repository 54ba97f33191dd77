//! # Contract ABI Codec
//!
//! Minimal Solidity ABI encoding for the registry contract: `uint256`,
//! `address`, `bool`, `string` and `uint256[]`.
//!
//! ## Layout
//!
//! ```text
//! call data = selector (4 bytes) || head || tail
//! head      = one 32-byte word per argument (value, or offset into tail)
//! tail      = length word || payload padded to 32 bytes (dynamic types)
//! ```

use primitive_types::U256;

use super::entities::Address;
use super::errors::AbiError;
use super::transaction::keccak256;

const WORD: usize = 32;

// Registry contract signatures.
pub const CREATE_PROJECT: &str = "createProject(string,string,uint256,string,string)";
pub const VERIFY_AND_ISSUE: &str = "verifyProjectAndIssueCredits(uint256,uint256,string)";
pub const ADD_VERIFIED_ORGANIZATION: &str = "addVerifiedOrganization(address)";
pub const GET_USER_PROJECTS: &str = "getUserProjects(address)";
pub const GET_PROJECT: &str = "getProject(uint256)";
pub const GET_PLATFORM_STATS: &str = "getPlatformStats()";
pub const IS_VERIFIED_ORGANIZATION: &str = "isVerifiedOrganization(address)";
pub const ADMIN: &str = "admin()";

/// Event emitted by `createProject`; the project id is the first indexed topic.
pub const PROJECT_CREATED_EVENT: &str = "ProjectCreated(uint256,string,address,string)";

/// ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Address(Address),
    Bool(bool),
    String(String),
    UintArray(Vec<U256>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::String(_) | Token::UintArray(_))
    }

    pub fn into_u64(self) -> Result<u64, AbiError> {
        match self {
            Token::Uint(v) => u256_to_u64(v),
            _ => Err(AbiError::Invalid { what: "uint256" }),
        }
    }

    pub fn into_string(self) -> Result<String, AbiError> {
        match self {
            Token::String(s) => Ok(s),
            _ => Err(AbiError::Invalid { what: "string" }),
        }
    }

    pub fn into_address(self) -> Result<Address, AbiError> {
        match self {
            Token::Address(a) => Ok(a),
            _ => Err(AbiError::Invalid { what: "address" }),
        }
    }

    pub fn into_bool(self) -> Result<bool, AbiError> {
        match self {
            Token::Bool(b) => Ok(b),
            _ => Err(AbiError::Invalid { what: "bool" }),
        }
    }

    pub fn into_uint_array(self) -> Result<Vec<U256>, AbiError> {
        match self {
            Token::UintArray(v) => Ok(v),
            _ => Err(AbiError::Invalid { what: "uint256[]" }),
        }
    }
}

/// Expected type of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Uint,
    Address,
    Bool,
    String,
    UintArray,
}

/// First four bytes of the keccak256 of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Full keccak256 of an event signature (topic 0).
pub fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

/// Encode a contract call.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode(args));
    out
}

/// Encode a sequence of arguments without selector.
pub fn encode(args: &[Token]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();
    let head_len = args.len() * WORD;

    for arg in args {
        if arg.is_dynamic() {
            head.extend(uint_word(U256::from(head_len + tail.len())));
            tail.extend(encode_dynamic(arg));
        } else {
            head.extend(encode_static(arg));
        }
    }

    head.extend(tail);
    head
}

fn encode_static(token: &Token) -> [u8; WORD] {
    match token {
        Token::Uint(v) => uint_word(*v),
        Token::Address(a) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(a.as_bytes());
            word
        }
        Token::Bool(b) => uint_word(U256::from(u8::from(*b))),
        Token::String(_) | Token::UintArray(_) => [0u8; WORD],
    }
}

fn encode_dynamic(token: &Token) -> Vec<u8> {
    match token {
        Token::String(s) => {
            let bytes = s.as_bytes();
            let mut out = uint_word(U256::from(bytes.len())).to_vec();
            out.extend_from_slice(bytes);
            let padding = (WORD - bytes.len() % WORD) % WORD;
            out.extend(std::iter::repeat(0u8).take(padding));
            out
        }
        Token::UintArray(values) => {
            let mut out = uint_word(U256::from(values.len())).to_vec();
            for v in values {
                out.extend(uint_word(*v));
            }
            out
        }
        _ => Vec::new(),
    }
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Decode return data against the expected output types.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    types
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let head = read_word(data, i * WORD)?;
            match ty {
                ParamType::Uint => Ok(Token::Uint(U256::from_big_endian(head))),
                ParamType::Address => {
                    if head[..12].iter().any(|b| *b != 0) {
                        return Err(AbiError::Invalid { what: "address" });
                    }
                    let mut addr = [0u8; 20];
                    addr.copy_from_slice(&head[12..]);
                    Ok(Token::Address(Address(addr)))
                }
                ParamType::Bool => match U256::from_big_endian(head) {
                    v if v.is_zero() => Ok(Token::Bool(false)),
                    v if v == U256::one() => Ok(Token::Bool(true)),
                    _ => Err(AbiError::Invalid { what: "bool" }),
                },
                ParamType::String => {
                    let offset = read_usize(data, i * WORD)?;
                    let len = read_usize(data, offset)?;
                    let start = offset + WORD;
                    let bytes = read_slice(data, start, len)?;
                    String::from_utf8(bytes.to_vec())
                        .map(Token::String)
                        .map_err(|_| AbiError::Invalid { what: "string" })
                }
                ParamType::UintArray => {
                    let offset = read_usize(data, i * WORD)?;
                    let len = read_usize(data, offset)?;
                    (0..len)
                        .map(|j| {
                            read_word(data, offset + WORD + j * WORD).map(U256::from_big_endian)
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(Token::UintArray)
                }
            }
        })
        .collect()
}

fn read_slice(data: &[u8], start: usize, len: usize) -> Result<&[u8], AbiError> {
    let end = start.checked_add(len).ok_or(AbiError::Overflow)?;
    data.get(start..end).ok_or(AbiError::TooShort {
        needed: end,
        available: data.len(),
    })
}

fn read_word(data: &[u8], start: usize) -> Result<&[u8], AbiError> {
    read_slice(data, start, WORD)
}

fn read_usize(data: &[u8], start: usize) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(read_word(data, start)?);
    if value > U256::from(u32::MAX) {
        return Err(AbiError::Overflow);
    }
    Ok(value.low_u64() as usize)
}

/// Narrow a 256-bit value to u64.
pub fn u256_to_u64(value: U256) -> Result<u64, AbiError> {
    if value > U256::from(u64::MAX) {
        return Err(AbiError::Overflow);
    }
    Ok(value.low_u64())
}
