//! Built-in command-line question sets.

pub(super) struct RawQuestion {
    pub id: u32,
    pub category: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
}

const fn q(
    id: u32,
    category: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
) -> RawQuestion {
    RawQuestion {
        id,
        category,
        prompt,
        options,
        correct,
        explanation,
    }
}

pub(super) const EASY: &[RawQuestion] = &[
    q(
        1,
        "Navigation",
        "Which command prints the current working directory?",
        &["cd", "pwd", "ls", "whoami"],
        1,
        "pwd (print working directory) shows the absolute path of the directory you are in.",
    ),
    q(
        2,
        "Navigation",
        "Which command lists the contents of a directory?",
        &["ls", "cat", "dir -r", "show"],
        0,
        "ls lists files and directories. Add -l for details or -a to include hidden files.",
    ),
    q(
        3,
        "Navigation",
        "How do you move to your home directory?",
        &["cd /", "cd ..", "cd ~", "cd -"],
        2,
        "~ expands to your home directory. Plain `cd` with no argument does the same.",
    ),
    q(
        4,
        "Navigation",
        "What does `cd ..` do?",
        &[
            "Moves to the root directory",
            "Moves up to the parent directory",
            "Lists hidden files",
            "Returns to the previous directory",
        ],
        1,
        ".. always refers to the parent of the current directory.",
    ),
    q(
        5,
        "Files",
        "Which command creates a new, empty directory?",
        &["touch", "mkdir", "newdir", "md5sum"],
        1,
        "mkdir creates directories. Use -p to create missing parent directories too.",
    ),
    q(
        6,
        "Files",
        "Which command creates an empty file or updates its timestamp?",
        &["touch", "echo", "cp", "new"],
        0,
        "touch creates the file if it does not exist, otherwise it updates the modification time.",
    ),
    q(
        7,
        "Files",
        "Which command prints the contents of a file to the terminal?",
        &["cat", "print", "open", "read"],
        0,
        "cat concatenates files and writes them to standard output.",
    ),
    q(
        8,
        "Files",
        "Which command copies a file?",
        &["mv", "cp", "dd", "ln"],
        1,
        "cp SOURCE DEST copies a file. Use -r to copy directories recursively.",
    ),
    q(
        9,
        "Files",
        "Which command renames or moves a file?",
        &["rn", "cp", "mv", "rename -x"],
        2,
        "mv moves a file to a new path, which is also how files are renamed.",
    ),
    q(
        10,
        "Help",
        "How do you open the manual page for `ls`?",
        &["help ls", "man ls", "info --ls", "ls --manual"],
        1,
        "man shows the manual page for a command. Press q to quit the pager.",
    ),
];

pub(super) const MEDIUM: &[RawQuestion] = &[
    q(
        101,
        "Files",
        "Which flag makes `rm` delete a directory and everything inside it?",
        &["-f", "-i", "-r", "-v"],
        2,
        "-r (recursive) descends into directories. Combine with care: there is no undo.",
    ),
    q(
        102,
        "Listing",
        "Which `ls` flag shows hidden files (names starting with a dot)?",
        &["-h", "-a", "-l", "-d"],
        1,
        "-a includes entries whose names begin with a dot.",
    ),
    q(
        103,
        "Text",
        "Which command shows the first 10 lines of a file?",
        &["tail", "head", "less", "cut"],
        1,
        "head prints the start of a file; -n changes how many lines.",
    ),
    q(
        104,
        "Text",
        "Which command follows a log file as new lines are appended?",
        &["tail -f", "head -f", "cat -f", "watch cat"],
        0,
        "tail -f keeps the file open and prints new lines as they arrive.",
    ),
    q(
        105,
        "Search",
        "Which command searches file contents for a pattern?",
        &["find", "grep", "locate", "which"],
        1,
        "grep prints lines that match a pattern. find searches by file attributes instead.",
    ),
    q(
        106,
        "Redirection",
        "What does `>` do in `echo hi > out.txt`?",
        &[
            "Appends to out.txt",
            "Overwrites out.txt with the output",
            "Reads input from out.txt",
            "Pipes output to a command named out.txt",
        ],
        1,
        "> redirects standard output to a file, truncating it first.",
    ),
    q(
        107,
        "Redirection",
        "Which operator appends output to a file instead of overwriting it?",
        &[">", ">>", "<", "|"],
        1,
        ">> opens the file in append mode.",
    ),
    q(
        108,
        "Pipes",
        "What does the `|` operator do?",
        &[
            "Runs two commands in parallel with no connection",
            "Sends the output of one command to the input of the next",
            "Runs the second command only if the first fails",
            "Writes output to a file",
        ],
        1,
        "A pipe connects standard output of the left command to standard input of the right.",
    ),
    q(
        109,
        "Text",
        "Which command counts lines, words and bytes?",
        &["wc", "nl", "count", "stat"],
        0,
        "wc (word count) reports lines, words and bytes; -l counts lines only.",
    ),
    q(
        110,
        "Search",
        "Which command finds files named `*.log` under the current directory?",
        &[
            "grep *.log .",
            "find . -name '*.log'",
            "ls -R *.log",
            "locate -here *.log",
        ],
        1,
        "find walks a directory tree and -name filters by a glob pattern.",
    ),
    q(
        111,
        "Permissions",
        "Which command changes a file's permissions?",
        &["chown", "chmod", "chgrp", "umask"],
        1,
        "chmod changes mode bits. chown changes the owner.",
    ),
    q(
        112,
        "Processes",
        "Which command shows running processes?",
        &["ps", "jobs -all", "proc", "run"],
        0,
        "ps lists processes; `ps aux` shows every process on the system.",
    ),
];

pub(super) const HARD: &[RawQuestion] = &[
    q(
        201,
        "Permissions",
        "What permissions does `chmod 754 file` set?",
        &[
            "rwxr-xr--",
            "rwxrw-r--",
            "rw-r-xr--",
            "rwxr--r-x",
        ],
        0,
        "7 = rwx for the owner, 5 = r-x for the group, 4 = r-- for others.",
    ),
    q(
        202,
        "Redirection",
        "How do you redirect both stdout and stderr of `cmd` to `all.log` in bash?",
        &[
            "cmd > all.log 2>&1",
            "cmd 2>&1 > all.log",
            "cmd | all.log",
            "cmd 1>2 all.log",
        ],
        0,
        "Redirections apply left to right: stdout goes to the file, then stderr is pointed at stdout.",
    ),
    q(
        203,
        "Processes",
        "Which signal does `kill` send when no signal is given?",
        &["SIGKILL", "SIGHUP", "SIGTERM", "SIGINT"],
        2,
        "kill defaults to SIGTERM (15), which asks the process to exit and can be handled.",
    ),
    q(
        204,
        "Processes",
        "What does appending `&` to a command do?",
        &[
            "Runs it with elevated privileges",
            "Runs it in the background",
            "Runs it only if the previous command succeeded",
            "Discards its output",
        ],
        1,
        "& starts the job in the background and returns the prompt immediately.",
    ),
    q(
        205,
        "Shell",
        "What does `cmd1 && cmd2` do?",
        &[
            "Runs both at the same time",
            "Runs cmd2 only if cmd1 fails",
            "Runs cmd2 only if cmd1 succeeds",
            "Pipes cmd1 into cmd2",
        ],
        2,
        "&& short-circuits: the right side runs only when the left exits with status 0.",
    ),
    q(
        206,
        "Shell",
        "Which variable holds the exit status of the last command?",
        &["$!", "$?", "$$", "$#"],
        1,
        "$? is the exit status. $$ is the shell PID and $! the last background PID.",
    ),
    q(
        207,
        "Text",
        "Which command prints the second field of each line of a CSV file?",
        &[
            "cut -d, -f2 file.csv",
            "cut -f2 file.csv",
            "awk -F2 file.csv",
            "sed -n 2p file.csv",
        ],
        0,
        "cut -d sets the delimiter and -f selects fields. Without -d, cut splits on tabs.",
    ),
    q(
        208,
        "Text",
        "Which command replaces every `foo` with `bar` on each line?",
        &[
            "sed 's/foo/bar/'",
            "sed 's/foo/bar/g'",
            "tr foo bar",
            "grep -r foo bar",
        ],
        1,
        "Without the g flag, sed only replaces the first match on each line.",
    ),
    q(
        209,
        "Text",
        "How do you count unique lines in a file?",
        &[
            "uniq file | wc -l",
            "sort file | uniq | wc -l",
            "wc -u file",
            "cat file | unique",
        ],
        1,
        "uniq only collapses adjacent duplicates, so the input must be sorted first.",
    ),
    q(
        210,
        "Links",
        "Which command creates a symbolic link `latest` pointing to `v2`?",
        &["ln v2 latest", "ln -s v2 latest", "ln -s latest v2", "link v2 latest"],
        1,
        "ln -s TARGET LINK_NAME. Without -s, ln creates a hard link.",
    ),
    q(
        211,
        "Disk",
        "Which command shows disk usage of a directory in human-readable form?",
        &["df -h dir", "du -sh dir", "ls -sh dir", "stat -h dir"],
        1,
        "du summarizes usage of files and directories; df reports free space per filesystem.",
    ),
    q(
        212,
        "Archives",
        "Which command extracts a gzip-compressed tarball?",
        &[
            "tar -czf archive.tar.gz",
            "tar -xzf archive.tar.gz",
            "gzip -x archive.tar.gz",
            "unzip archive.tar.gz",
        ],
        1,
        "x extracts, z filters through gzip and f names the archive file.",
    ),
    q(
        213,
        "Environment",
        "How do you make a variable visible to child processes?",
        &["set VAR=1", "export VAR=1", "local VAR=1", "env VAR"],
        1,
        "export marks the variable for inclusion in the environment of commands run later.",
    ),
    q(
        214,
        "Search",
        "Which `grep` flag searches recursively through directories?",
        &["-i", "-v", "-r", "-n"],
        2,
        "-r recurses. -i ignores case, -v inverts the match and -n prints line numbers.",
    ),
    q(
        215,
        "Processes",
        "Which command shows a live, updating view of processes?",
        &["ps", "top", "pgrep", "lsof"],
        1,
        "top refreshes periodically and can sort by CPU or memory.",
    ),
];

pub(super) const EXPERT: &[RawQuestion] = &[
    q(
        301,
        "Shell",
        "What does `set -e` do in a bash script?",
        &[
            "Echoes each command before running it",
            "Exits when a command fails",
            "Treats unset variables as errors",
            "Enables extended globbing",
        ],
        1,
        "set -e aborts the script on a non-zero exit status. set -u handles unset variables.",
    ),
    q(
        302,
        "Shell",
        "Which option makes a pipeline fail if any command in it fails?",
        &["set -e", "set -x", "set -o pipefail", "shopt -s failglob"],
        2,
        "By default a pipeline's status is that of its last command; pipefail changes that.",
    ),
    q(
        303,
        "Shell",
        "What does `$(command)` do?",
        &[
            "Runs command in the background",
            "Substitutes the command's output",
            "Expands to the command's exit status",
            "Defines a function",
        ],
        1,
        "Command substitution runs the command and replaces the expression with its stdout.",
    ),
    q(
        304,
        "Shell",
        "What does `${VAR:-default}` expand to when VAR is unset?",
        &["An empty string", "default", "An error", "VAR"],
        1,
        ":- substitutes the default when the variable is unset or empty without assigning it.",
    ),
    q(
        305,
        "Text",
        "Which awk program prints the sum of the first column?",
        &[
            "awk '{print $1}'",
            "awk '{s+=$1} END {print s}'",
            "awk 'sum($1)'",
            "awk -s 1",
        ],
        1,
        "The END block runs after all input, once s has accumulated every first field.",
    ),
    q(
        306,
        "Search",
        "Which command runs `rm` on every `.tmp` file found, safely handling spaces?",
        &[
            "find . -name '*.tmp' | rm",
            "find . -name '*.tmp' -print0 | xargs -0 rm",
            "rm $(find . -name '*.tmp')",
            "ls *.tmp | xargs rm",
        ],
        1,
        "-print0 and xargs -0 separate names with NUL bytes, which cannot appear in paths.",
    ),
    q(
        307,
        "Redirection",
        "What does `2>/dev/null` do?",
        &[
            "Discards standard output",
            "Discards standard error",
            "Closes standard input",
            "Redirects stderr to stdout",
        ],
        1,
        "File descriptor 2 is stderr; /dev/null discards anything written to it.",
    ),
    q(
        308,
        "Processes",
        "Which command keeps a process running after you log out?",
        &["bg", "nohup", "exec", "wait"],
        1,
        "nohup ignores SIGHUP, which is sent to jobs when the terminal closes.",
    ),
    q(
        309,
        "Processes",
        "Which command lists open files and the processes holding them?",
        &["lsof", "fuser -v", "ps -f", "stat"],
        0,
        "lsof lists open files, including sockets, per process.",
    ),
    q(
        310,
        "Permissions",
        "What does the setuid bit on an executable do?",
        &[
            "Prevents it from being deleted",
            "Runs it with the file owner's privileges",
            "Makes it readable by everyone",
            "Runs it as the group owner",
        ],
        1,
        "setuid programs execute with the effective user id of the file owner.",
    ),
    q(
        311,
        "Permissions",
        "With a umask of 022, what mode does a new regular file get?",
        &["644", "755", "622", "600"],
        0,
        "Files start from 666; masking 022 removes group and other write, leaving 644.",
    ),
    q(
        312,
        "Text",
        "Which sed command deletes blank lines?",
        &["sed '/^$/d'", "sed 's/^$//'", "sed -n '/^$/p'", "sed 'd/^$/'"],
        0,
        "/^$/ matches empty lines and d deletes them from the output.",
    ),
    q(
        313,
        "Shell",
        "What is the difference between `'$HOME'` and `\"$HOME\"`?",
        &[
            "None",
            "Single quotes prevent expansion; double quotes allow it",
            "Double quotes prevent expansion; single quotes allow it",
            "Single quotes only work in zsh",
        ],
        1,
        "Single quotes are fully literal. Double quotes still expand variables and substitutions.",
    ),
    q(
        314,
        "Networking",
        "Which command fetches a URL and writes the body to stdout?",
        &["curl URL", "wget -q URL", "ping URL", "ssh URL"],
        0,
        "curl writes to stdout by default; wget saves to a file unless told otherwise.",
    ),
    q(
        315,
        "Networking",
        "Which command copies a file to a remote host over SSH?",
        &["cp host:file", "scp file host:path", "ssh-copy file host", "ftp file host"],
        1,
        "scp uses the SSH protocol. rsync -e ssh is an alternative for large trees.",
    ),
    q(
        316,
        "Jobs",
        "Which command brings the most recent background job to the foreground?",
        &["bg", "fg", "jobs", "disown"],
        1,
        "fg resumes a job in the foreground; bg resumes it in the background.",
    ),
    q(
        317,
        "Shell",
        "What does `exec > log.txt` do inside a script?",
        &[
            "Runs log.txt as a program",
            "Redirects stdout of the rest of the script to log.txt",
            "Replaces the script with a new shell",
            "Appends the script to log.txt",
        ],
        1,
        "exec with only redirections changes the current shell's file descriptors.",
    ),
    q(
        318,
        "Disk",
        "Which command shows free space on each mounted filesystem?",
        &["du -h", "df -h", "free -h", "mount -s"],
        1,
        "df reports filesystem usage; free reports memory, not disk.",
    ),
];
