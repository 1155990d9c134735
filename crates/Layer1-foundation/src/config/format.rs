//! 설정 파일 포맷 감지 및 파싱

use crate::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// 지원하는 설정 파일 포맷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (주석 허용)
    Json,
    /// TOML
    Toml,
}

impl ConfigFormat {
    /// 확장자로 포맷 결정 (`.toml` 외에는 JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(&strip_json_comments(content))?),
            Self::Toml => Ok(toml::from_str(content)?),
        }
    }
}

/// 파일을 읽어 포맷에 맞게 파싱
pub fn load_from_path<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    ConfigFormat::from_path(path).parse(&content)
}

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Str,
    Escape,
    LineComment,
    BlockComment,
}

/// JSON 주석 제거 (`//`, `/* */`). 문자열 내부는 건드리지 않음
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = Scan::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        state = match (state, c) {
            (Scan::Code, '"') => {
                out.push(c);
                Scan::Str
            }
            (Scan::Code, '/') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Code, _) => {
                out.push(c);
                Scan::Code
            }
            (Scan::Str, '\\') => {
                out.push(c);
                Scan::Escape
            }
            (Scan::Str, '"') => {
                out.push(c);
                Scan::Code
            }
            (Scan::Str, _) | (Scan::Escape, _) => {
                out.push(c);
                Scan::Str
            }
            (Scan::LineComment, '\n') => {
                out.push(c);
                Scan::Code
            }
            (Scan::LineComment, _) => Scan::LineComment,
            (Scan::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            (Scan::BlockComment, _) => Scan::BlockComment,
        };
    }

    out
}
