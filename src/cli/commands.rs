//! Command definitions and execution for the `fs-store` CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use super::client::{FileApi, DEFAULT_BASE_URL};
use crate::datetime::{format_local, parse_rfc3339};
use crate::file::{MAX_CONTENT_SIZE, MAX_FILENAME_LENGTH};
use crate::FsStoreError;

/// Exit status for a successful command.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for any failed command.
pub const EXIT_FAILURE: u8 = 1;

const GENERIC_FAILURE: &str = "Something is wrong. Please check your settings.";

/// File Storage CLI
#[derive(Parser, Debug)]
#[command(name = "fs-store")]
#[command(about = "File Storage CLI")]
pub struct Cli {
    /// Base URL of the fs-store server
    #[arg(long, env = "FS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload the specified file to the storage
    Upload {
        /// Path of the file to upload
        file: PathBuf,
    },

    /// Delete the specified file on the storage
    Delete {
        /// Id of the file to delete
        id: String,
    },

    /// Show list of files on the storage
    List {
        /// Cursor to the next page
        #[arg(long)]
        next: Option<String>,
    },
}

/// Runs CLI commands against a [`FileApi`], writing results to `out` and
/// failures to `err`.
pub struct CommandExecutor<A, O, E> {
    api: A,
    out: O,
    err: E,
}

impl<A: FileApi, O: Write, E: Write> CommandExecutor<A, O, E> {
    /// Create a new executor.
    pub fn new(api: A, out: O, err: E) -> Self {
        Self { api, out, err }
    }

    /// Consume the executor, returning its output streams.
    pub fn into_output(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Execute a command and return the process exit status.
    pub async fn execute(&mut self, command: &Command) -> u8 {
        match command {
            Command::Upload { file } => self.upload(file).await,
            Command::Delete { id } => self.delete(id).await,
            Command::List { next } => self.list(next.as_deref()).await,
        }
    }

    async fn upload(&mut self, path: &Path) -> u8 {
        let (file_name, content) = match read_upload(path).await {
            Ok(upload) => upload,
            Err(message) => return self.fail(message),
        };

        match self.api.upload(&file_name, content).await {
            Ok(id) => {
                self.say("File has been successfully uploaded.");
                self.say(&format!("fileId: {id}"));
                EXIT_SUCCESS
            }
            Err(e) => {
                tracing::debug!("Upload failed: {}", e);
                self.fail(GENERIC_FAILURE)
            }
        }
    }

    async fn delete(&mut self, id: &str) -> u8 {
        match self.api.delete(id).await {
            Ok(()) => {
                self.say("File has been successfully deleted.");
                EXIT_SUCCESS
            }
            Err(FsStoreError::NotFound(_)) => self.fail("File does not exist."),
            Err(e) => {
                tracing::debug!("Delete failed: {}", e);
                self.fail(GENERIC_FAILURE)
            }
        }
    }

    async fn list(&mut self, cursor: Option<&str>) -> u8 {
        let page = match self.api.list(cursor).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("List failed: {}", e);
                return self.fail(GENERIC_FAILURE);
            }
        };

        for item in &page.items {
            self.say(&format!(
                "{}\t{}\t{}\t{}",
                item.id,
                display_time(&item.created_at),
                display_time(&item.updated_at),
                item.file_name
            ));
        }
        if let Some(next) = &page.next_cursor {
            self.say(&format!("See next page: {next}"));
        }

        EXIT_SUCCESS
    }

    fn say(&mut self, line: &str) {
        // Nothing useful to do if stdout is gone
        let _ = writeln!(self.out, "{line}");
    }

    fn fail(&mut self, message: &str) -> u8 {
        let _ = writeln!(self.err, "{message}");
        EXIT_FAILURE
    }
}

/// Check a local file against the upload limits and read it.
async fn read_upload(path: &Path) -> Result<(String, Vec<u8>), &'static str> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err("File does not exist."),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or("File does not exist.")?;
    if file_name.chars().count() > MAX_FILENAME_LENGTH {
        return Err("File name must not be longer than 100.");
    }
    if metadata.len() > MAX_CONTENT_SIZE as u64 {
        return Err("File size must not be larger than 5MB.");
    }

    let content = tokio::fs::read(path).await.map_err(|e| {
        tracing::debug!("Failed to read {}: {}", path.display(), e);
        GENERIC_FAILURE
    })?;
    Ok((file_name, content))
}

/// Render a server timestamp in local time, or as-is if it does not parse.
fn display_time(value: &str) -> String {
    parse_rfc3339(value)
        .map(|dt| format_local(&dt))
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::dto::{FileListItem, FileListResponse};
    use crate::Result;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// How the fake server answers.
    #[derive(Clone, Copy, Default)]
    enum Reply {
        #[default]
        Ok,
        NotFound,
        Broken,
    }

    #[derive(Default)]
    struct FakeApi {
        reply: Reply,
        uploads: Mutex<Vec<(String, usize)>>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    impl FakeApi {
        fn replying(reply: Reply) -> Self {
            Self {
                reply,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<()> {
            match self.reply {
                Reply::Ok => Ok(()),
                Reply::NotFound => Err(FsStoreError::NotFound("File".to_string())),
                Reply::Broken => Err(FsStoreError::Http("connection refused".to_string())),
            }
        }
    }

    impl FileApi for &FakeApi {
        async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String> {
            self.check()?;
            self.uploads
                .lock()
                .unwrap()
                .push((file_name.to_string(), content.len()));
            Ok("0123456789abcdef0123456789abcdef".to_string())
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            self.check()
        }

        async fn list(&self, cursor: Option<&str>) -> Result<FileListResponse> {
            self.check()?;
            self.cursors.lock().unwrap().push(cursor.map(str::to_string));
            Ok(FileListResponse {
                items: vec![FileListItem {
                    id: "0123456789abcdef0123456789abcdef".to_string(),
                    file_name: "a b.txt".to_string(),
                    created_at: "not a time".to_string(),
                    updated_at: "not a time".to_string(),
                }],
                next_cursor: Some("1_0123456789abcdef0123456789abcdef".to_string()),
            })
        }
    }

    async fn run(api: &FakeApi, command: Command) -> (u8, String, String) {
        let mut executor = CommandExecutor::new(api, Vec::new(), Vec::new());
        let code = executor.execute(&command).await;
        let (out, err) = executor.into_output();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn upload(path: PathBuf) -> Command {
        Command::Upload { file: path }
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["fs-store", "--base-url", "http://h:1", "list", "--next", "c"]);
        assert_eq!(cli.base_url, "http://h:1");
        assert_eq!(
            cli.command,
            Command::List {
                next: Some("c".to_string())
            }
        );

        let cli = Cli::parse_from(["fs-store", "delete", "abc"]);
        assert_eq!(
            cli.command,
            Command::Delete {
                id: "abc".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upload_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hello.txt");
        std::fs::write(&path, b"hello").unwrap();
        let api = FakeApi::default();

        let (code, out, err) = run(&api, upload(path)).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            out,
            "File has been successfully uploaded.\nfileId: 0123456789abcdef0123456789abcdef\n"
        );
        assert!(err.is_empty());
        assert_eq!(*api.uploads.lock().unwrap(), vec![("hello.txt".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let api = FakeApi::default();

        let (code, out, err) = run(&api, upload(temp_dir.path().join("nope.txt"))).await;
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "File does not exist.\n");

        // A directory is not an uploadable file
        let (code, _, err) = run(&api, upload(temp_dir.path().to_path_buf())).await;
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err, "File does not exist.\n");
        assert!(api.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_name_too_long() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a".repeat(MAX_FILENAME_LENGTH + 1));
        std::fs::write(&path, b"x").unwrap();
        let api = FakeApi::default();

        let (code, _, err) = run(&api, upload(path)).await;

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err, "File name must not be longer than 100.\n");
        assert!(api.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.bin");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_CONTENT_SIZE as u64 + 1).unwrap();
        let api = FakeApi::default();

        let (code, _, err) = run(&api, upload(path)).await;

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err, "File size must not be larger than 5MB.\n");
    }

    #[tokio::test]
    async fn test_upload_server_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hello.txt");
        std::fs::write(&path, b"hello").unwrap();
        let api = FakeApi::replying(Reply::Broken);

        let (code, out, err) = run(&api, upload(path)).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, format!("{GENERIC_FAILURE}\n"));
    }

    #[tokio::test]
    async fn test_delete() {
        let command = Command::Delete {
            id: "0123456789abcdef0123456789abcdef".to_string(),
        };

        let (code, out, _) = run(&FakeApi::default(), command.clone()).await;
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "File has been successfully deleted.\n");

        let (code, _, err) = run(&FakeApi::replying(Reply::NotFound), command.clone()).await;
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err, "File does not exist.\n");

        let (code, _, err) = run(&FakeApi::replying(Reply::Broken), command).await;
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err, format!("{GENERIC_FAILURE}\n"));
    }

    #[tokio::test]
    async fn test_list_prints_items_and_cursor() {
        let api = FakeApi::default();

        let (code, out, _) = run(
            &api,
            Command::List {
                next: Some("5_0123456789abcdef0123456789abcdef".to_string()),
            },
        )
        .await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            out,
            "0123456789abcdef0123456789abcdef\tnot a time\tnot a time\ta b.txt\n\
             See next page: 1_0123456789abcdef0123456789abcdef\n"
        );
        assert_eq!(
            *api.cursors.lock().unwrap(),
            vec![Some("5_0123456789abcdef0123456789abcdef".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_failure() {
        let (code, out, err) =
            run(&FakeApi::replying(Reply::NotFound), Command::List { next: None }).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, format!("{GENERIC_FAILURE}\n"));
    }

    #[test]
    fn test_display_time() {
        let shown = display_time("2023-01-22T07:07:16.440Z");
        assert!(shown.starts_with("2023/01/2"));
        assert_eq!(display_time("garbage"), "garbage");
    }
}
