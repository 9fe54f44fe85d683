//! 按扩展名校验文件头

const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

enum Signature {
    Prefix(&'static [&'static [u8]]),
    /// 纯文本，要求内容是 UTF-8
    Text,
}

fn signature_for(extension: &str) -> Option<Signature> {
    let signature = match extension {
        ".png" => Signature::Prefix(&[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]]),
        ".jpg" | ".jpeg" => Signature::Prefix(&[&[0xFF, 0xD8, 0xFF]]),
        ".gif" => Signature::Prefix(&[b"GIF87a", b"GIF89a"]),
        ".pdf" => Signature::Prefix(&[b"%PDF"]),
        ".doc" | ".xls" | ".ppt" => Signature::Prefix(&[OLE]),
        ".docx" | ".xlsx" | ".pptx" | ".zip" => Signature::Prefix(&[ZIP]),
        ".7z" => Signature::Prefix(&[&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]]),
        ".gz" => Signature::Prefix(&[&[0x1F, 0x8B]]),
        ".txt" | ".md" | ".csv" | ".json" => Signature::Text,
        _ => return None,
    };
    Some(signature)
}

/// 文件头是否与扩展名（含点号）相符，未知扩展名一律拒绝
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match signature_for(&extension.to_ascii_lowercase()) {
        Some(Signature::Prefix(prefixes)) => prefixes.iter().any(|p| data.starts_with(p)),
        Some(Signature::Text) => std::str::from_utf8(data).is_ok(),
        None => false,
    }
}

/// 取文件名扩展名（小写，含点号）
pub fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_signatures() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png, ".png"));
        assert!(validate_magic_bytes(&png, ".PNG"));
        assert!(!validate_magic_bytes(&png, ".jpg"));

        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".docx"));
    }

    #[test]
    fn test_text_must_be_utf8() {
        assert!(validate_magic_bytes("Essay – draft".as_bytes(), ".txt"));
        assert!(!validate_magic_bytes(&[0xFF, 0xFE, 0x00, 0xD8], ".md"));
    }

    #[test]
    fn test_empty_or_unknown_is_rejected() {
        assert!(!validate_magic_bytes(&[], ".txt"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Essay.PDF").as_deref(), Some(".pdf"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".env"), None);
    }
}
