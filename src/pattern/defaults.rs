//! Built-in exclude patterns applied when `use_default_excludes` is set.

/// Version-control metadata, OS droppings and editor backup files.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Editor and temporary files
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    // CVS
    "**/CVS/**",
    "**/.cvsignore",
    // RCS / SCCS
    "**/RCS/**",
    "**/SCCS/**",
    // Visual SourceSafe
    "**/vssver.scc",
    // Subversion
    "**/.svn/**",
    // GNU Arch
    "**/.arch-ids/**",
    // Bazaar
    "**/.bzr/**",
    // SurroundSCM
    "**/.MySCMServerInfo",
    // macOS
    "**/.DS_Store",
    // Serena Dimensions
    "**/.metadata/**",
    // Mercurial
    "**/.hg/**",
    // Git
    "**/.git/**",
    "**/.gitignore",
    "**/.gitattributes",
    // BitKeeper
    "**/BitKeeper/**",
    "**/ChangeSet/**",
    // darcs
    "**/_darcs/**",
    "**/.darcsrepo/**",
    "**/-darcs-backup*",
    "**/.darcs-temp-mail",
];
