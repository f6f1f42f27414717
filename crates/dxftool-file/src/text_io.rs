//! 文本行读写
//!
//! 源文件按字节读取，再用检测到的编码解码；输出统一写成 UTF-8、`\n` 换行。
//! 文件句柄只在各自函数内存活。

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::FileError;

fn decode_line(bytes: &[u8], encoding: &'static Encoding) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// 读取前 `limit` 行
pub fn read_header(path: &Path, limit: usize, encoding: &'static Encoding) -> Result<Vec<String>, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::with_capacity(limit);
    let mut buf = Vec::new();

    while lines.len() < limit {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(decode_line(&buf, encoding));
    }

    Ok(lines)
}

/// 用指定编码读取全部行
pub fn read_lines(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>, FileError> {
    let bytes = fs::read(path)?;
    let (text, actual, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::debug!(
            "{} contains bytes invalid in {}, replaced",
            path.display(),
            actual.name()
        );
    }
    Ok(text.lines().map(str::to_owned).collect())
}

/// 写出所有行（覆盖已有文件）
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), FileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
