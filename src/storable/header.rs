use crate::error::ParseError;

/// Split formatted object bytes into the type tag and the content that follows the header.
///
/// The header is `"{type} {len}\0"`. The declared length must match the content exactly.
pub(super) fn parse(bytes: &[u8]) -> Result<(&[u8], &[u8]), ParseError> {
    let nul_idx =
        memchr::memchr(b'\0', bytes).ok_or(ParseError::MalformedHeader("no NUL byte"))?;

    let mut tokens = bytes[..nul_idx]
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let (Some(tag), Some(size), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseError::MalformedHeader(
            "header must be exactly `<type> <size>`",
        ));
    };

    let declared = parse_size(size).ok_or_else(|| ParseError::InvalidSize(size.into()))?;

    let content = &bytes[nul_idx + 1..];
    if declared != content.len() {
        return Err(ParseError::TruncatedContent {
            declared,
            actual: content.len(),
        });
    }

    Ok((tag, content))
}

fn parse_size(bytes: &[u8]) -> Option<usize> {
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}
