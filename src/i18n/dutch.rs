use super::TranslationSet;

pub(super) fn translations() -> TranslationSet {
    TranslationSet {
        error_occurred: "Er is iets fout gegaan! Maak alsjeblieft een issue aan op: https://github.com/gitdeck/gitdeck/issues",
        not_a_repository: "Fout: moet in een git repository uitgevoerd worden",
        bare_repository: "Fout: kale repositories worden niet ondersteund, geef een werkmap op met --work-tree",
        repository_access_denied: "Fout: de repository kon niet gelezen worden, controleer of je er toegang toe hebt",
        log_file_missing: "Logbestand bestaat niet. Start eerst `gitdeck --debug` om het logbestand aan te maken",
        tailing_log_file: "Logbestand volgen",
        filter_mode_banner: "Gefilterd op pad",
        branch_label: "Op branch",
        detached_head: "HEAD losgekoppeld",
        operation_in_progress: "bezig",
        staged_label: "gestaged",
        unstaged_label: "niet gestaged",
        untracked_label: "niet gevolgd",
        clean_worktree: "werkmap schoon",
        no_commits: "Geen commits",
        no_branches: "Geen branches",
        no_stashes: "Geen stash items",
        no_reflog: "Geen reflog items",
        unknown_key: "Onbekende toets",
        keybindings_title: "Sneltoetsen",
        prompt: "gitdeck>",
        goodbye: "Doei",
    }
}
