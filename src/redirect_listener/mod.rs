use crate::log;
use std::{
    io::{prelude::*, BufReader},
    net::{TcpListener, TcpStream},
};
use anyhow::{Result, bail};

pub const REDIRECT_ADDR: &str = "127.0.0.1:8080";

fn handle_request(stream: TcpStream) -> Result<Option<String>> {
    let request = match read_request_line(BufReader::new(&stream)) {
        Ok(line) => line,
        Err(e) => {
            error_res(format!("Unreadable request: {}", e), stream)?;
            return Ok(None);
        }
    };

    if let Some(target) = request_target(&request) {
        // browsers also ask for a favicon, wait for the real callback
        if target.contains('?') {
            success_res(stream)?;
            return Ok(Some(target));
        }
        error_res("No query in request".to_string(), stream)?;
        return Ok(None);
    }

    error_res("Malformed request".to_string(), stream)?;
    Ok(None)
}

/* Reads up to the end of the first line, however many reads the client needs to send it */
pub fn read_request_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    Ok(line)
}

/* Returns the target of the HTTP request line (`GET /?code=... HTTP/1.1`) */
pub fn request_target(request: &str) -> Option<String> {
    let split: Vec<&str> = request.split_whitespace().collect();

    if split.len() > 1 {
        return Some(split[1].to_string());
    }

    None
}

pub fn get_callback() -> Result<String> {
    let listener = TcpListener::bind(REDIRECT_ADDR);

    match listener {
        Ok(listener) => {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        if let Some(url) = handle_request(stream)? {
                            return Ok(url);
                        }
                    }
                    Err(e) => log::warn(format!("Callback connection failed: {}", e)),
                };
            }
        }
        Err(e) => bail!("Unable to setup listener on {} for getting authorization code.\nError info: {}", REDIRECT_ADDR, e)
    }

    bail!("App was unable to get authorization code from Google API");
}

fn success_res(mut stream: TcpStream) -> Result<()> {
    let contents = include_str!("success.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
        contents.len(),
        contents
    );

    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

fn error_res(error_message: String, mut stream: TcpStream) -> Result<()> {
    log::debug(format!("Rejected callback request: {}", error_message));
    let response = format!(
        "HTTP/1.1 400 Bad Request\r\n\r\n400 - Bad Request - {}\n",
        error_message
    );

    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
