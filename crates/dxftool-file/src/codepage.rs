//! DXF 代码页 → 文本编码
//!
//! `$DWGCODEPAGE` 中的 `ANSI_1250` 之类标记以 Windows 代码页编号结尾，
//! 这里把编号映射到 `encoding_rs` 支持的编码。参见
//! <https://docs.rs/encoding_rs/0.8/encoding_rs/#relationship-with-windows-code-pages>

use encoding_rs::Encoding;

/// 按 Windows 代码页编号查找编码，不支持的编号返回 `None`
pub fn encoding_for_code_page(code_page: u16) -> Option<&'static Encoding> {
    match code_page {
        874 => Some(encoding_rs::WINDOWS_874),
        1250..=1258 => Encoding::for_label(format!("windows-{code_page}").as_bytes()),
        932 => Some(encoding_rs::SHIFT_JIS),
        936 => Some(encoding_rs::GBK),
        949 => Some(encoding_rs::EUC_KR),
        950 => Some(encoding_rs::BIG5),
        866 => Some(encoding_rs::IBM866),
        1200 => Some(encoding_rs::UTF_16LE),
        1201 => Some(encoding_rs::UTF_16BE),
        10000 => Some(encoding_rs::MACINTOSH),
        20866 => Some(encoding_rs::KOI8_R),
        21866 => Some(encoding_rs::KOI8_U),
        20932 | 51932 => Some(encoding_rs::EUC_JP),
        // ISO-8859-1 在 WHATWG 中即 windows-1252
        28591 => Some(encoding_rs::WINDOWS_1252),
        28592..=28606 => Encoding::for_label(format!("iso-8859-{}", code_page - 28590).as_bytes()),
        54936 => Some(encoding_rs::GB18030),
        65001 => Some(encoding_rs::UTF_8),
        _ => None,
    }
}
