/// Status value the service reports while writing the processed file.
pub const SAVING_STATUS: &str = "saving";
/// Status value the service reports once the whole video went through.
pub const COMPLETED_STATUS: &str = "completed";

/// Every user-visible string. Defaults match the service's French web UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texts {
    pub status_prefix: String,
    pub starting: String,
    pub stopped: String,
    pub saving_note: String,
    pub start_failed: String,
    pub stop_failed: String,
    pub generic_failure: String,
    pub delete_file_failed: String,
    pub delete_all_failed: String,
    pub delete_all_unreachable: String,
    pub page_unavailable: String,
    pub download_failed: String,
    pub download_error: String,
    /// `{filename}` is replaced with the file being deleted.
    pub confirm_delete_file: String,
    pub confirm_delete_all: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            status_prefix: "Statut: ".to_string(),
            starting: "Démarrage du traitement...".to_string(),
            stopped: "Traitement arrêté.".to_string(),
            saving_note: " (Sauvegarde en cours...)".to_string(),
            start_failed: "Erreur lors de la sélection de la vidéo.".to_string(),
            stop_failed: "Erreur lors de l'arrêt du traitement.".to_string(),
            generic_failure: "Une erreur s'est produite.".to_string(),
            delete_file_failed: "Erreur lors de la suppression du fichier.".to_string(),
            delete_all_failed: "Erreur lors de la suppression des vidéos importées.".to_string(),
            delete_all_unreachable:
                "Une erreur s'est produite lors de la suppression des vidéos importées."
                    .to_string(),
            page_unavailable: "Page indisponible.".to_string(),
            download_failed: "Fichier non trouvé".to_string(),
            download_error: "Échec du téléchargement".to_string(),
            confirm_delete_file: "Êtes-vous sûr de vouloir supprimer {filename} ?".to_string(),
            confirm_delete_all: "Êtes-vous sûr de vouloir supprimer toutes les vidéos importées ?"
                .to_string(),
        }
    }
}

impl Texts {
    pub fn status_line(&self, body: &str) -> String {
        format!("{}{}", self.status_prefix, body)
    }

    /// Renders a polled status, annotated while the service is saving.
    pub fn polled_status_line(&self, status: &str) -> String {
        if status == SAVING_STATUS {
            format!("{}{}{}", self.status_prefix, status, self.saving_note)
        } else {
            self.status_line(status)
        }
    }

    pub fn delete_file_prompt(&self, filename: &str) -> String {
        self.confirm_delete_file.replace("{filename}", filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saving_status_gets_annotation() {
        let texts = Texts::default();
        assert_eq!(
            texts.polled_status_line("saving"),
            "Statut: saving (Sauvegarde en cours...)"
        );
        assert_eq!(texts.polled_status_line("Saving"), "Statut: Saving");
        assert_eq!(texts.polled_status_line("processing"), "Statut: processing");
    }

    #[test]
    fn delete_prompt_names_the_file() {
        let texts = Texts::default();
        assert_eq!(
            texts.delete_file_prompt("out.mp4"),
            "Êtes-vous sûr de vouloir supprimer out.mp4 ?"
        );
    }
}
