//! Static package catalog
//!
//! Curated sample of packages the UI offers for selection. A future
//! version could ask the target distro's repositories instead.

const PACKAGES: [&str; 54] = [
    "curl",
    "bash",
    "git",
    "wget",
    "vim",
    "ca-certificates",
    "openssl",
    "jq",
    "tar",
    "gzip",
    "sed",
    "awk",
    "grep",
    "python3",
    "nodejs",
    "nginx",
    "postgresql",
    "redis",
    "sqlite",
    "gcc",
    "make",
    "cmake",
    "go",
    "rust",
    "perl",
    "ruby",
    "php",
    "java",
    "maven",
    "gradle",
    "docker",
    "kubectl",
    "helm",
    "terraform",
    "ansible",
    "tmux",
    "screen",
    "htop",
    "net-tools",
    "iputils",
    "bind-utils",
    "openssh-client",
    "rsync",
    "unzip",
    "zip",
    "less",
    "nano",
    "emacs",
    "tree",
    "findutils",
    "coreutils",
    "util-linux",
    "procps",
    "psmisc",
];

/// Package names offered by the catalog, in display order.
pub fn installable_packages() -> &'static [&'static str] {
    &PACKAGES
}
