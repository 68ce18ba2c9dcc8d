//! Standard-library registries used to classify builtin dependencies.
//!
//! Each [`Language`] owns one immutable [`BuiltinRegistry`]. Registries are
//! built on first use and shared for the lifetime of the process.

use std::{collections::HashSet, sync::OnceLock};

use crate::Language;

/// Node.js core modules.
const JAVASCRIPT_MODULES: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "crypto",
    "dgram", "diagnostics_channel", "dns", "events", "fs", "http", "http2", "https",
    "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "timers", "tls",
    "tty", "url", "util", "v8", "vm", "worker_threads", "zlib",
];

/// Python 3 standard library top-level modules.
const PYTHON_MODULES: &[&str] = &[
    "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio", "asyncore",
    "atexit", "audioop", "base64", "bdb", "binascii", "binhex", "bisect", "builtins",
    "bz2", "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code", "codecs",
    "codeop", "collections", "colorsys", "compileall", "concurrent", "configparser",
    "contextlib", "contextvars", "copy", "copyreg", "cProfile", "crypt", "csv",
    "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal", "difflib",
    "dis", "distutils", "doctest", "email", "encodings", "enum", "errno",
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "formatter",
    "fractions", "ftplib", "functools", "gc", "getopt", "getpass", "gettext", "glob",
    "graphlib", "grp", "gzip", "hashlib", "heapq", "hmac", "html", "http", "idlelib",
    "imaplib", "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
    "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma", "mailbox",
    "mailcap", "marshal", "math", "mimetypes", "mmap", "modulefinder",
    "multiprocessing", "netrc", "nis", "nntplib", "numbers", "operator", "optparse",
    "os", "ossaudiodev", "parser", "pathlib", "pdb", "pickle", "pickletools", "pipes",
    "pkgutil", "platform", "plistlib", "poplib", "posix", "posixpath", "pprint",
    "profile", "pstats", "pty", "pwd", "py_compile", "pyclbr", "pydoc", "queue",
    "quopri", "random", "re", "readline", "reprlib", "resource", "rlcompleter",
    "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex", "shutil",
    "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "spwd",
    "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct",
    "subprocess", "sunau", "symbol", "symtable", "sys", "sysconfig", "syslog",
    "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test", "textwrap",
    "threading", "time", "timeit", "tkinter", "token", "tokenize", "tomllib", "trace",
    "traceback", "tracemalloc", "tty", "turtle", "turtledemo", "types", "typing",
    "unicodedata", "unittest", "urllib", "uu", "uuid", "venv", "warnings", "wave",
    "weakref", "webbrowser", "winreg", "winsound", "wsgiref", "xdrlib", "xml",
    "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib", "zoneinfo",
];

/// C and C++ standard headers, plus the POSIX `sys/` tree.
const CPP_HEADERS: &[&str] = &[
    // C
    "assert.h", "complex.h", "ctype.h", "errno.h", "fenv.h", "float.h", "inttypes.h",
    "iso646.h", "limits.h", "locale.h", "math.h", "setjmp.h", "signal.h", "stdalign.h",
    "stdarg.h", "stdatomic.h", "stdbool.h", "stddef.h", "stdint.h", "stdio.h",
    "stdlib.h", "stdnoreturn.h", "string.h", "tgmath.h", "threads.h", "time.h",
    "uchar.h", "wchar.h", "wctype.h",
    // POSIX
    "dirent.h", "fcntl.h", "pthread.h", "unistd.h", "sys",
    // C++
    "algorithm", "any", "array", "atomic", "bitset", "cassert", "cctype", "cerrno",
    "cfloat", "charconv", "chrono", "cinttypes", "climits", "clocale", "cmath",
    "codecvt", "compare", "complex", "concepts", "condition_variable", "coroutine",
    "csetjmp", "csignal", "cstdarg", "cstddef", "cstdint", "cstdio", "cstdlib",
    "cstring", "ctime", "cwchar", "deque", "exception", "execution", "filesystem",
    "format", "forward_list", "fstream", "functional", "future", "initializer_list",
    "iomanip", "ios", "iosfwd", "iostream", "istream", "iterator", "limits", "list",
    "locale", "map", "memory", "memory_resource", "mutex", "new", "numbers", "numeric",
    "optional", "ostream", "queue", "random", "ranges", "ratio", "regex",
    "scoped_allocator", "set", "shared_mutex", "source_location", "span", "sstream",
    "stack", "stdexcept", "streambuf", "string", "string_view", "system_error",
    "thread", "tuple", "type_traits", "typeindex", "typeinfo", "unordered_map",
    "unordered_set", "utility", "valarray", "variant", "vector", "version",
];

/// Java SE packages.
const JAVA_PACKAGES: &[&str] = &[
    "java.applet", "java.awt", "java.beans", "java.io", "java.lang", "java.math",
    "java.net", "java.nio", "java.rmi", "java.security", "java.sql", "java.text",
    "java.time", "java.util", "javax.accessibility", "javax.activation",
    "javax.activity", "javax.annotation", "javax.crypto", "javax.imageio",
    "javax.jws", "javax.lang", "javax.management", "javax.naming", "javax.net",
    "javax.print", "javax.rmi", "javax.script", "javax.security", "javax.sound",
    "javax.sql", "javax.swing", "javax.tools", "javax.transaction", "javax.xml",
];

/// Go standard library top-level packages.
const GO_PACKAGES: &[&str] = &[
    "archive", "bufio", "bytes", "cmp", "compress", "container", "context", "crypto",
    "database", "debug", "embed", "encoding", "errors", "expvar", "flag", "fmt", "go",
    "hash", "html", "image", "index", "io", "iter", "log", "maps", "math", "mime",
    "net", "os", "path", "plugin", "reflect", "regexp", "runtime", "slices", "sort",
    "strconv", "strings", "sync", "syscall", "testing", "text", "time", "unicode",
    "unique", "unsafe",
];

/// An immutable set of standard-library module names for one language.
///
/// A token matches when it equals an entry, or when it starts with an entry
/// followed by the language's segment separator (`fs/promises` matches
/// `fs`, `java.util.List` matches `java.util`).
#[derive(Debug)]
pub struct BuiltinRegistry {
    modules: HashSet<&'static str>,
    separator: char,
    scheme: Option<&'static str>,
}

impl BuiltinRegistry {
    fn new(modules: &'static [&'static str], separator: char) -> Self {
        Self {
            modules: modules.iter().copied().collect(),
            separator,
            scheme: None,
        }
    }

    fn with_scheme(mut self, scheme: &'static str) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Returns the registry for `language`.
    pub fn for_language(language: Language) -> &'static BuiltinRegistry {
        static JAVASCRIPT: OnceLock<BuiltinRegistry> = OnceLock::new();
        static PYTHON: OnceLock<BuiltinRegistry> = OnceLock::new();
        static CPP: OnceLock<BuiltinRegistry> = OnceLock::new();
        static JAVA: OnceLock<BuiltinRegistry> = OnceLock::new();
        static GO: OnceLock<BuiltinRegistry> = OnceLock::new();

        match language {
            Language::JavaScript => JAVASCRIPT
                .get_or_init(|| BuiltinRegistry::new(JAVASCRIPT_MODULES, '/').with_scheme("node:")),
            Language::Python => PYTHON.get_or_init(|| BuiltinRegistry::new(PYTHON_MODULES, '.')),
            Language::Cpp => CPP.get_or_init(|| BuiltinRegistry::new(CPP_HEADERS, '/')),
            Language::Java => JAVA.get_or_init(|| BuiltinRegistry::new(JAVA_PACKAGES, '.')),
            Language::Go => GO.get_or_init(|| BuiltinRegistry::new(GO_PACKAGES, '/')),
        }
    }

    /// Returns `true` if `token` exactly or prefix-matches an entry.
    pub fn contains(&self, token: &str) -> bool {
        if self.scheme.is_some_and(|scheme| token.starts_with(scheme)) {
            return true;
        }

        if self.modules.contains(token) {
            return true;
        }

        token
            .match_indices(self.separator)
            .any(|(idx, _)| self.modules.contains(&token[..idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let registry = BuiltinRegistry::for_language(Language::JavaScript);
        assert!(registry.contains("fs"));
        assert!(registry.contains("child_process"));
        assert!(!registry.contains("lodash"));
    }

    #[test]
    fn test_prefix_match_respects_separator() {
        let js = BuiltinRegistry::for_language(Language::JavaScript);
        assert!(js.contains("fs/promises"));
        assert!(!js.contains("osx-utils"));
        assert!(!js.contains("fsevents"));

        let python = BuiltinRegistry::for_language(Language::Python);
        assert!(python.contains("os.path"));
        assert!(python.contains("xml.etree.ElementTree"));
        assert!(!python.contains("osmium"));

        let java = BuiltinRegistry::for_language(Language::Java);
        assert!(java.contains("java.util.List"));
        assert!(java.contains("java.util.*"));
        assert!(!java.contains("javafx.scene"));

        let go = BuiltinRegistry::for_language(Language::Go);
        assert!(go.contains("net/http"));
        assert!(go.contains("encoding/json"));
        assert!(!go.contains("github.com/pkg/errors"));
    }

    #[test]
    fn test_node_scheme() {
        let js = BuiltinRegistry::for_language(Language::JavaScript);
        assert!(js.contains("node:fs"));
        assert!(js.contains("node:test"));

        // The scheme is a JavaScript-only convention
        let go = BuiltinRegistry::for_language(Language::Go);
        assert!(!go.contains("node:fs"));
    }

    #[test]
    fn test_cpp_headers() {
        let cpp = BuiltinRegistry::for_language(Language::Cpp);
        assert!(cpp.contains("vector"));
        assert!(cpp.contains("stdio.h"));
        assert!(cpp.contains("sys/types.h"));
        assert!(!cpp.contains("boost/asio.hpp"));
    }

    #[test]
    fn test_registry_is_shared() {
        let first = BuiltinRegistry::for_language(Language::Python);
        let second = BuiltinRegistry::for_language(Language::Python);
        assert!(std::ptr::eq(first, second));
        assert!(first.contains("os"));
    }
}
