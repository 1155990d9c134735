//! Core Traits - 키 해석 및 런타임 재설정 인터페이스
//!
//! - `ClassCategory`: 컴포넌트 변형을 구분하는 고정 열거형
//! - `KeyResolver`: (category, custom name) → 등록 키
//! - `RuntimeConfigurable`: 재생성 없이 새 옵션을 적용할 수 있는 컴포넌트

use super::options::RuntimeOptions;
use crate::{Error, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// 키 구분자
pub const KEY_SEPARATOR: char = '.';

// ============================================================================
// ClassCategory - 카테고리 열거형
// ============================================================================

/// 카테고리 열거형이 구현해야 하는 trait
pub trait ClassCategory: Copy + Debug + Send + Sync {
    /// 고정 카테고리의 정식 이름 (키의 identity 부분)
    fn canonical_name(&self) -> &'static str;

    /// 호출자가 이름을 지정하는 확장형 카테고리인지 여부
    fn is_custom(&self) -> bool;
}

// ============================================================================
// KeyResolver - 키 해석 전략
// ============================================================================

/// (category, custom name) 쌍을 `"{identity}.{ClassType}"` 키로 변환
///
/// 도메인마다 자신의 `class_type` 구분자와 카테고리 열거형을 제공합니다.
/// 해석은 순수 함수이며 같은 입력에 대해 항상 같은 키를 반환합니다.
pub trait KeyResolver<T: ClassCategory>: Send + Sync {
    /// 클래스 타입 구분자 (예: "VisionFunction")
    fn class_type(&self) -> &str;

    /// 키 해석
    ///
    /// 고정 카테고리는 `custom_name`을 무시합니다.
    /// Custom 카테고리의 이름은 앞뒤 공백을 제거해 사용하며, 비어 있으면 `Error::InvalidArgument`.
    fn resolve(&self, category: T, custom_name: &str) -> Result<String> {
        compose_key(category, custom_name, self.class_type())
    }
}

/// 기본 키 조합 규칙
pub fn compose_key<T: ClassCategory>(
    category: T,
    custom_name: &str,
    class_type: &str,
) -> Result<String> {
    let identity = if category.is_custom() {
        let name = custom_name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "{:?} category requires a non-empty custom name",
                category
            )));
        }
        name
    } else {
        category.canonical_name()
    };

    Ok(format!("{}{}{}", identity, KEY_SEPARATOR, class_type))
}

/// 키를 (identity, class_type)으로 분리
///
/// custom name에 구분자가 포함될 수 있으므로 마지막 구분자를 기준으로 나눕니다.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    let (identity, class_type) = key.rsplit_once(KEY_SEPARATOR)?;
    if identity.is_empty() || class_type.is_empty() {
        return None;
    }
    Some((identity, class_type))
}

// ============================================================================
// RuntimeConfigurable - 런타임 재설정 가능 컴포넌트
// ============================================================================

/// 런타임에 옵션 스냅샷을 받아 적용할 수 있는 컴포넌트
///
/// 구현체는 검증을 먼저 수행하고 성공한 경우에만 새 설정을 게시해야 합니다.
/// 실패하면 `Error::InvalidConfiguration`을 반환하고 이전 설정을 유지합니다.
pub trait RuntimeConfigurable: Send + Sync {
    /// 새 옵션 적용
    fn refresh_runtime_parameters(&self, options: &RuntimeOptions) -> Result<()>;

    /// 현재 적용된 옵션
    fn runtime_options(&self) -> Arc<RuntimeOptions>;

    /// 활성화 여부
    fn is_enabled(&self) -> bool {
        self.runtime_options().enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Shape {
        Circle,
        Custom,
    }

    impl ClassCategory for Shape {
        fn canonical_name(&self) -> &'static str {
            match self {
                Shape::Circle => "Circle",
                Shape::Custom => "Custom",
            }
        }

        fn is_custom(&self) -> bool {
            matches!(self, Shape::Custom)
        }
    }

    struct ShapeResolver;

    impl KeyResolver<Shape> for ShapeResolver {
        fn class_type(&self) -> &str {
            "Shape"
        }
    }

    #[test]
    fn test_fixed_category_ignores_name() {
        let resolver = ShapeResolver;
        assert_eq!(resolver.resolve(Shape::Circle, "").unwrap(), "Circle.Shape");
        assert_eq!(
            resolver.resolve(Shape::Circle, "Whatever").unwrap(),
            "Circle.Shape"
        );
    }

    #[test]
    fn test_custom_category() {
        let resolver = ShapeResolver;
        assert_eq!(resolver.resolve(Shape::Custom, "Hex").unwrap(), "Hex.Shape");

        let err = resolver.resolve(Shape::Custom, "").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(resolver.resolve(Shape::Custom, "   ").is_err());
    }

    #[test]
    fn test_custom_name_is_trimmed() {
        let resolver = ShapeResolver;
        assert_eq!(resolver.resolve(Shape::Custom, " Hex ").unwrap(), "Hex.Shape");
        assert_eq!(
            resolver.resolve(Shape::Custom, "\tHex\n").unwrap(),
            resolver.resolve(Shape::Custom, "Hex").unwrap()
        );
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("Blob.VisionFunction"), Some(("Blob", "VisionFunction")));
        assert_eq!(
            split_key("my.fancy.VisionFunction"),
            Some(("my.fancy", "VisionFunction"))
        );
        assert_eq!(split_key("NoSeparator"), None);
        assert_eq!(split_key(".VisionFunction"), None);
    }
}
