//! Reading local files into the opaque payload sent with `send_file`.

use std::path::Path;

use base64::Engine;

use crate::error::ClientError;

/// A file ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `data:<media type>;base64,<contents>`
    pub data_url: String,
    pub media_type: String,
    pub file_name: String,
}

pub async fn load_attachment(path: &str) -> Result<Attachment, ClientError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::InvalidCommand(format!("cannot read '{}': {}", path, e)))?;

    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string();
    let media_type = media_type_for(&file_name).to_string();

    Ok(Attachment {
        data_url: encode_data_url(&media_type, &bytes),
        media_type,
        file_name,
    })
}

pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Media type guessed from the file extension.
pub fn media_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known_and_unknown_extensions() {
        // テスト項目: 拡張子から MIME タイプを推定し、不明なら octet-stream になる
        // given (前提条件):
        let names = ["cat.PNG", "photo.jpeg", "notes", "archive.tar.gz"];

        // when (操作):
        let types: Vec<&str> = names.iter().map(|name| media_type_for(name)).collect();

        // then (期待する結果):
        assert_eq!(
            types,
            vec!["image/png", "image/jpeg", "application/octet-stream", "application/octet-stream"]
        );
    }

    #[test]
    fn test_encode_data_url() {
        // テスト項目: data URL 形式で base64 エンコードされる
        // given (前提条件):
        let bytes = b"hello";

        // when (操作):
        let url = encode_data_url("text/plain", bytes);

        // then (期待する結果):
        assert_eq!(url, "data:text/plain;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        // テスト項目: 存在しないファイルは InvalidCommand エラーになる
        // given (前提条件):
        let path = "/nonexistent/hiroba/file.png";

        // when (操作):
        let result = load_attachment(path).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }
}
