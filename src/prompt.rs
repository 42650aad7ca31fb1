use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Asks whether to move `count` charts, repeating the question until the
/// answer is `y` or `n` (any case). End of input counts as `n`.
pub async fn confirm<R, W>(count: usize, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("Move {count} OK sabuns?\n").as_bytes()).await?;
    let mut line = String::new();
    loop {
        output.write_all(b"(y/n): ").await?;
        output.flush().await?;
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            return Ok(false);
        }
        match line.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}
