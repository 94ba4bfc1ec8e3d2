// Chunked JSON streaming utilities
use async_compression::tokio::bufread::BrotliEncoder;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Create a chunked JSON streaming response. Each stream item becomes one
/// length-prefixed chunk so the consumer can frame messages without
/// buffering the whole response.
pub async fn chunked_json_stream<S, T>(
    stream: S,
    compress: bool,
) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + Sync + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(&msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // NOTE: We do NOT set Content-Encoding here because we compress
    // individual chunks, not the entire HTTP response. Setting it would
    // make clients try to decompress the stream itself, which breaks the
    // chunk framing.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::TRANSFER_ENCODING, "chunked");

    response
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a chunk: JSON payload, optionally Brotli
/// compressed, prefixed with its length as 4 bytes big-endian.
async fn serialize_chunk<T: Serialize>(msg: &T, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(msg)?;

    let payload = if compress {
        let cursor = std::io::Cursor::new(buffer);
        let mut encoder = BrotliEncoder::new(cursor);
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await?;
        compressed
    } else {
        buffer
    };

    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

#[cfg(test)]
mod tests {
    use async_compression::tokio::bufread::BrotliDecoder;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Update {
        kind: String,
        value: f64,
    }

    #[tokio::test]
    async fn test_chunk_framing_uncompressed() {
        let msg = Update {
            kind: "snapshot".to_string(),
            value: 50000.0,
        };
        let chunk = serialize_chunk(&msg, false).await.unwrap();

        let length = u32::from_be_bytes(chunk[..4].try_into().unwrap()) as usize;
        assert_eq!(length, chunk.len() - 4);

        let decoded: Update = serde_json::from_slice(&chunk[4..]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[tokio::test]
    async fn test_chunk_framing_compressed_round_trip() {
        let msg = Update {
            kind: "series".to_string(),
            value: 1.25,
        };
        let chunk = serialize_chunk(&msg, true).await.unwrap();

        let length = u32::from_be_bytes(chunk[..4].try_into().unwrap()) as usize;
        assert_eq!(length, chunk.len() - 4);

        let cursor = std::io::Cursor::new(chunk[4..].to_vec());
        let mut decoder = BrotliDecoder::new(cursor);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).await.unwrap();

        let decoded: Update = serde_json::from_slice(&decompressed).unwrap();
        assert_eq!(decoded, msg);
    }
}
