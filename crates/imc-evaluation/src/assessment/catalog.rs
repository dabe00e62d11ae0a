use super::domain::{
    AnswerOption, Category, RangeTone, ScoreRange, Theme, ThemeAccent, ThemeId,
};

/// Ordered, immutable set of evaluation themes loaded once at startup.
#[derive(Debug)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    pub fn standard() -> Self {
        Self {
            themes: standard_themes(),
        }
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn theme(&self, id: ThemeId) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    /// Checks the configuration invariants the engine relies on: every theme
    /// carries at least one question, and its score ranges partition the
    /// legal total domain with no gaps and no overlaps. Run at data-load
    /// time; malformed themes must never reach the questionnaire.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for theme in &self.themes {
            if theme.question_count() == 0 {
                return Err(CatalogError::EmptyTheme { theme: theme.id });
            }

            let (min_total, max_total) = theme.score_domain();
            for score in min_total..=max_total {
                let matches = theme
                    .ranges
                    .iter()
                    .filter(|range| range.contains(score))
                    .count();
                match matches {
                    0 => return Err(CatalogError::RangeGap { theme: theme.id, score }),
                    1 => {}
                    _ => return Err(CatalogError::RangeOverlap { theme: theme.id, score }),
                }
            }
        }
        Ok(())
    }
}

/// Malformed theme configuration, surfaced at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("theme '{theme}' has no questions")]
    EmptyTheme { theme: ThemeId },
    #[error("theme '{theme}' has no score range covering total {score}")]
    RangeGap { theme: ThemeId, score: u16 },
    #[error("theme '{theme}' has overlapping score ranges at total {score}")]
    RangeOverlap { theme: ThemeId, score: u16 },
}

/// The fixed four-point agreement scale shown for every question.
pub fn answer_options() -> [AnswerOption; 4] {
    [
        AnswerOption {
            value: 1,
            label: "Pas du tout d'accord",
        },
        AnswerOption {
            value: 2,
            label: "Peu d'accord",
        },
        AnswerOption {
            value: 3,
            label: "Plutôt d'accord",
        },
        AnswerOption {
            value: 4,
            label: "Tout à fait d'accord",
        },
    ]
}

fn standard_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: ThemeId::ClimatSocial,
            title: "Climat social et bien-être organisationnel",
            short_title: "Climat Social",
            description: "Évaluez les relations interpersonnelles, le bien-être et la culture d'engagement au sein de votre organisation.",
            accent: ThemeAccent {
                icon: "heart",
                gradient: "from-rose-500 to-pink-500",
            },
            categories: vec![
                Category {
                    name: "Relations interprofessionnelles et confiance",
                    questions: vec![
                        "Les relations entre collaborateurs sont globalement saines et respectueuses.",
                        "Les collaborateurs se sentent écoutés par leur hiérarchie.",
                        "La confiance est présente entre les équipes et le management.",
                        "Les conflits sont gérés de manière constructive.",
                        "Le climat social favorise la collaboration plutôt que la compétition négative.",
                    ],
                },
                Category {
                    name: "Bien-être et motivation",
                    questions: vec![
                        "Les collaborateurs se sentent motivés dans leur travail au quotidien.",
                        "Les conditions de travail permettent un bon équilibre entre vie professionnelle et personnelle.",
                        "Les efforts et les résultats sont reconnus à leur juste valeur.",
                        "Le stress professionnel est maîtrisé dans l'organisation.",
                        "Les collaborateurs se sentent respectés et considérés.",
                    ],
                },
                Category {
                    name: "Culture et engagement",
                    questions: vec![
                        "Les valeurs de l'entreprise sont claires et partagées.",
                        "Les collaborateurs se sentent fiers d'appartenir à l'organisation.",
                        "La communication interne est fluide et transparente.",
                        "Les différences culturelles, générationnelles ou sociales sont respectées.",
                        "L'entreprise favorise un climat inclusif et équitable.",
                    ],
                },
            ],
            ranges: vec![
                ScoreRange {
                    min: 15,
                    max: 29,
                    label: "Critique",
                    tone: RangeTone::Critical,
                    analysis: "Les résultats indiquent un climat social fortement dégradé. Les relations internes semblent marquées par un manque de confiance, une communication insuffisante et des tensions non résolues.",
                    recommendations: vec![
                        "Un diagnostic social approfondi",
                        "Un accompagnement managérial ciblé",
                        "La mise en place d'un plan d'amélioration du climat social",
                    ],
                },
                ScoreRange {
                    min: 30,
                    max: 39,
                    label: "Fragile",
                    tone: RangeTone::Warning,
                    analysis: "Votre entreprise dispose de certaines bases positives, mais le climat social reste instable et vulnérable. Des difficultés peuvent être observées notamment dans la communication interne et la reconnaissance des efforts.",
                    recommendations: vec![
                        "Des actions ciblées d'amélioration du climat social",
                        "Un accompagnement des managers",
                        "La mise en place d'indicateurs de suivi du bien-être",
                    ],
                },
                ScoreRange {
                    min: 40,
                    max: 49,
                    label: "Stable",
                    tone: RangeTone::Stable,
                    analysis: "Le climat social de votre organisation est globalement sain et fonctionnel. Les relations de travail sont positives, le niveau de confiance est satisfaisant et les collaborateurs se sentent majoritairement impliqués.",
                    recommendations: vec![
                        "Consolider les pratiques actuelles",
                        "Investir dans la prévention des risques psychosociaux",
                        "Renforcer la culture managériale et la communication interne",
                    ],
                },
                ScoreRange {
                    min: 50,
                    max: 60,
                    label: "Performant",
                    tone: RangeTone::Success,
                    analysis: "Votre entreprise bénéficie d'un climat social très favorable, caractérisé par un haut niveau de confiance, de motivation et d'engagement. Ce climat constitue un avantage compétitif majeur.",
                    recommendations: vec![
                        "Mise en place de dispositifs d'innovation sociale",
                        "Développement de pratiques managériales avancées",
                        "Positionnement comme référence en matière de climat social",
                    ],
                },
            ],
        },
        Theme {
            id: ThemeId::Leadership,
            title: "Leadership et gouvernance managériale",
            short_title: "Leadership",
            description: "Analysez la vision, la posture managériale et l'efficacité de la communication au sein de votre direction.",
            accent: ThemeAccent {
                icon: "users",
                gradient: "from-blue-500 to-indigo-500",
            },
            categories: vec![
                Category {
                    name: "Vision, posture et exemplarité",
                    questions: vec![
                        "La vision stratégique de l'entreprise est claire et partagée par les équipes.",
                        "Les dirigeants et managers incarnent les valeurs de l'entreprise.",
                        "Les managers font preuve d'exemplarité dans leurs comportements.",
                        "Les décisions managériales sont cohérentes et assumées.",
                        "Le leadership favorise la confiance et l'engagement.",
                    ],
                },
                Category {
                    name: "Management des équipes",
                    questions: vec![
                        "Les objectifs sont clairement définis et compris par les équipes.",
                        "Les managers savent motiver et mobiliser leurs collaborateurs.",
                        "Le feedback est régulier, constructif et orienté amélioration.",
                        "Les managers accompagnent efficacement le développement des compétences.",
                        "Les situations difficiles sont gérées avec professionnalisme.",
                    ],
                },
                Category {
                    name: "Communication & prise de décision",
                    questions: vec![
                        "La communication managériale est claire, ouverte et transparente.",
                        "Les collaborateurs peuvent s'exprimer librement et être entendus.",
                        "Les décisions sont prises dans des délais raisonnables.",
                        "Les managers savent arbitrer et prioriser efficacement.",
                        "Le management favorise l'intelligence collective.",
                    ],
                },
            ],
            ranges: vec![
                ScoreRange {
                    min: 15,
                    max: 29,
                    label: "Critique",
                    tone: RangeTone::Critical,
                    analysis: "Les résultats révèlent un leadership fragilisé et des pratiques managériales peu structurées. Le manque de vision partagée et l'insuffisance de communication génèrent désengagement et tensions.",
                    recommendations: vec![
                        "Un diagnostic managérial approfondi",
                        "Un coaching des dirigeants et managers",
                        "La mise en place de bases managériales solides",
                    ],
                },
                ScoreRange {
                    min: 30,
                    max: 39,
                    label: "Fragile",
                    tone: RangeTone::Warning,
                    analysis: "Le leadership existe mais reste inégal et peu homogène. Certaines pratiques managériales sont efficaces, mais d'autres manquent de cohérence ou de constance.",
                    recommendations: vec![
                        "Un renforcement des compétences managériales",
                        "Des actions de coaching ciblées",
                        "L'harmonisation des pratiques de leadership",
                    ],
                },
                ScoreRange {
                    min: 40,
                    max: 49,
                    label: "Stable",
                    tone: RangeTone::Stable,
                    analysis: "Le leadership est globalement fonctionnel et structuré. Les managers remplissent leur rôle, les équipes sont encadrées et les décisions sont majoritairement efficaces.",
                    recommendations: vec![
                        "Le développement du leadership transformationnel",
                        "Le renforcement du feedback et de l'intelligence collective",
                        "Des formations avancées en management",
                    ],
                },
                ScoreRange {
                    min: 50,
                    max: 60,
                    label: "Performant",
                    tone: RangeTone::Success,
                    analysis: "Votre organisation bénéficie d'un leadership fort, structurant et inspirant. Les managers incarnent la vision, mobilisent les équipes et favorisent l'engagement durable.",
                    recommendations: vec![
                        "Maintien et valorisation des bonnes pratiques",
                        "Dispositifs de leadership avancé",
                        "Positionnement des managers comme leaders d'influence",
                    ],
                },
            ],
        },
        Theme {
            id: ThemeId::Performance,
            title: "Performance et engagement des équipes",
            short_title: "Performance",
            description: "Mesurez le pilotage des objectifs, l'engagement des collaborateurs et la culture de reconnaissance.",
            accent: ThemeAccent {
                icon: "target",
                gradient: "from-emerald-500 to-teal-500",
            },
            categories: vec![
                Category {
                    name: "Objectifs & pilotage de la performance",
                    questions: vec![
                        "Les objectifs individuels et collectifs sont clairement définis.",
                        "Les objectifs sont alignés avec la stratégie globale de l'entreprise.",
                        "Les indicateurs de performance sont pertinents et suivis régulièrement.",
                        "Les collaborateurs comprennent comment leur travail contribue aux résultats.",
                        "Les résultats sont analysés et partagés de manière constructive.",
                    ],
                },
                Category {
                    name: "Engagement & responsabilisation",
                    questions: vec![
                        "Les collaborateurs sont impliqués dans l'atteinte des résultats.",
                        "Chacun se sent responsable de la performance collective.",
                        "Les initiatives et les prises de responsabilité sont encouragées.",
                        "Les collaborateurs font preuve de proactivité dans leur travail.",
                        "L'engagement des équipes est stable et durable.",
                    ],
                },
                Category {
                    name: "Reconnaissance & amélioration continue",
                    questions: vec![
                        "Les efforts et les résultats sont reconnus à leur juste valeur.",
                        "Les performances individuelles et collectives sont valorisées.",
                        "Les erreurs sont utilisées comme leviers d'apprentissage.",
                        "L'entreprise encourage l'amélioration continue.",
                        "La culture du résultat est positive et motivante.",
                    ],
                },
            ],
            ranges: vec![
                ScoreRange {
                    min: 15,
                    max: 29,
                    label: "Critique",
                    tone: RangeTone::Critical,
                    analysis: "Les résultats traduisent un faible niveau de performance et d'engagement. Les objectifs peuvent être flous, peu partagés ou mal suivis, limitant l'implication des équipes.",
                    recommendations: vec![
                        "Un diagnostic approfondi de la performance humaine",
                        "La clarification des objectifs et des rôles",
                        "La mise en place d'un système de pilotage de la performance",
                    ],
                },
                ScoreRange {
                    min: 30,
                    max: 39,
                    label: "Fragile",
                    tone: RangeTone::Warning,
                    analysis: "La performance existe, mais elle reste irrégulière et dépendante des individus. L'engagement peut varier selon les équipes, les managers ou les périodes.",
                    recommendations: vec![
                        "Le renforcement des mécanismes d'engagement",
                        "L'harmonisation des pratiques de reconnaissance",
                        "L'instauration d'une culture claire de la performance",
                    ],
                },
                ScoreRange {
                    min: 40,
                    max: 49,
                    label: "Stable",
                    tone: RangeTone::Stable,
                    analysis: "Votre organisation affiche un niveau de performance globalement satisfaisant. Les objectifs sont connus, les équipes engagées et les résultats atteints de manière régulière.",
                    recommendations: vec![
                        "L'optimisation des outils de pilotage",
                        "Le développement de la reconnaissance et de la motivation",
                        "Le renforcement de la culture de l'amélioration continue",
                    ],
                },
                ScoreRange {
                    min: 50,
                    max: 60,
                    label: "Performant",
                    tone: RangeTone::Success,
                    analysis: "Votre entreprise bénéficie d'un haut niveau de performance et d'engagement. Les équipes sont responsabilisées, motivées et orientées résultats.",
                    recommendations: vec![
                        "La pérennisation des bonnes pratiques",
                        "L'innovation dans le management de la performance",
                        "Le positionnement comme organisation apprenante",
                    ],
                },
            ],
        },
        Theme {
            id: ThemeId::Organisation,
            title: "Organisation et efficacité opérationnelle",
            short_title: "Organisation",
            description: "Évaluez la clarté des rôles, l'efficacité des processus et la capacité d'adaptation de votre structure.",
            accent: ThemeAccent {
                icon: "settings",
                gradient: "from-violet-500 to-purple-500",
            },
            categories: vec![
                Category {
                    name: "Structure et rôles",
                    questions: vec![
                        "Les rôles et responsabilités sont clairement définis dans l'organisation.",
                        "Chaque collaborateur connaît précisément son périmètre d'action.",
                        "Les fiches de poste sont claires et à jour.",
                        "Les chevauchements de responsabilités sont limités.",
                        "La structure organisationnelle est adaptée aux activités de l'entreprise.",
                    ],
                },
                Category {
                    name: "Processus et coordination",
                    questions: vec![
                        "Les processus de travail sont clairement formalisés.",
                        "Les circuits de décision sont simples et efficaces.",
                        "La coordination entre les services est fluide.",
                        "Les délais de traitement des tâches sont maîtrisés.",
                        "Les dysfonctionnements organisationnels sont rapidement corrigés.",
                    ],
                },
                Category {
                    name: "Agilité et amélioration continue",
                    questions: vec![
                        "L'organisation s'adapte facilement aux changements.",
                        "Les collaborateurs comprennent les évolutions organisationnelles.",
                        "Les outils de travail sont adaptés aux besoins opérationnels.",
                        "L'entreprise encourage la remise en question des pratiques existantes.",
                        "L'amélioration continue fait partie de la culture interne.",
                    ],
                },
            ],
            ranges: vec![
                ScoreRange {
                    min: 15,
                    max: 29,
                    label: "Inefficace",
                    tone: RangeTone::Critical,
                    analysis: "Les résultats mettent en évidence une organisation peu structurée, avec des rôles flous, des processus inefficaces et une coordination insuffisante entre les équipes.",
                    recommendations: vec![
                        "Un diagnostic organisationnel approfondi",
                        "La clarification des rôles et responsabilités",
                        "La refonte des processus clés",
                    ],
                },
                ScoreRange {
                    min: 30,
                    max: 39,
                    label: "Fragile",
                    tone: RangeTone::Warning,
                    analysis: "L'organisation fonctionne, mais de manière perfectible et inégale. Certains processus sont efficaces, tandis que d'autres freinent la performance et la réactivité.",
                    recommendations: vec![
                        "L'optimisation des processus existants",
                        "L'amélioration de la coordination interservices",
                        "L'accompagnement dans la conduite du changement",
                    ],
                },
                ScoreRange {
                    min: 40,
                    max: 49,
                    label: "Fonctionnelle",
                    tone: RangeTone::Stable,
                    analysis: "Votre organisation est globalement structurée et opérationnelle. Les processus sont identifiés, les rôles clairs et la coordination globalement efficace.",
                    recommendations: vec![
                        "L'amélioration continue des processus",
                        "Le renforcement des outils de pilotage opérationnel",
                        "L'anticipation des évolutions organisationnelles",
                    ],
                },
                ScoreRange {
                    min: 50,
                    max: 60,
                    label: "Agile & Performante",
                    tone: RangeTone::Success,
                    analysis: "Votre entreprise bénéficie d'une organisation fluide, structurée et adaptable. Les processus soutiennent la performance et facilitent l'atteinte des objectifs.",
                    recommendations: vec![
                        "La pérennisation des bonnes pratiques",
                        "L'innovation organisationnelle",
                        "Le partage des standards d'excellence en interne",
                    ],
                },
            ],
        },
        Theme {
            id: ThemeId::Talents,
            title: "Développement des talents et compétences",
            short_title: "Talents",
            description: "Analysez votre capacité à identifier, développer et fidéliser les talents au sein de votre organisation.",
            accent: ThemeAccent {
                icon: "graduation-cap",
                gradient: "from-amber-500 to-orange-500",
            },
            categories: vec![
                Category {
                    name: "Identification & gestion des talents",
                    questions: vec![
                        "Les compétences clés nécessaires à la performance sont clairement identifiées.",
                        "L'entreprise sait repérer les talents à fort potentiel.",
                        "Les postes sont occupés par des profils adaptés aux exigences du rôle.",
                        "Les talents sont valorisés et reconnus au sein de l'organisation.",
                        "La gestion des talents est alignée avec la stratégie de l'entreprise.",
                    ],
                },
                Category {
                    name: "Formation & développement des compétences",
                    questions: vec![
                        "L'entreprise dispose d'un plan de formation structuré.",
                        "Les formations proposées répondent aux besoins réels des équipes.",
                        "Les collaborateurs ont des opportunités de développement professionnel.",
                        "Le coaching et l'accompagnement individuel sont encouragés.",
                        "Les compétences acquises sont mises en pratique dans le travail quotidien.",
                    ],
                },
                Category {
                    name: "Évolution professionnelle & fidélisation",
                    questions: vec![
                        "Les perspectives d'évolution professionnelle sont claires.",
                        "Les mobilités internes sont encouragées et accompagnées.",
                        "Les collaborateurs se projettent durablement dans l'entreprise.",
                        "L'entreprise agit pour limiter le turnover des talents clés.",
                        "La culture de l'apprentissage continu est bien ancrée.",
                    ],
                },
            ],
            ranges: vec![
                ScoreRange {
                    min: 15,
                    max: 29,
                    label: "Critique",
                    tone: RangeTone::Critical,
                    analysis: "Les résultats révèlent une faible structuration des pratiques de gestion des talents. Les compétences ne sont pas suffisamment identifiées et les parcours de développement sont limités.",
                    recommendations: vec![
                        "Un diagnostic RH approfondi",
                        "La structuration de la gestion des compétences",
                        "La mise en place de parcours de développement adaptés",
                    ],
                },
                ScoreRange {
                    min: 30,
                    max: 39,
                    label: "Fragile",
                    tone: RangeTone::Warning,
                    analysis: "Certaines pratiques existent, mais elles restent peu formalisées et inégales. Le développement des talents dépend souvent d'initiatives ponctuelles plutôt que d'une stratégie claire.",
                    recommendations: vec![
                        "La formalisation des pratiques RH",
                        "Le déploiement de plans de formation ciblés",
                        "Le renforcement du coaching et de l'accompagnement",
                    ],
                },
                ScoreRange {
                    min: 40,
                    max: 49,
                    label: "Structurée",
                    tone: RangeTone::Stable,
                    analysis: "Votre entreprise dispose de pratiques globalement structurées et efficaces. Les talents sont identifiés, les compétences développées et les collaborateurs engagés.",
                    recommendations: vec![
                        "L'optimisation des parcours professionnels",
                        "Le renforcement de la mobilité interne",
                        "L'ancrage d'une culture forte de développement continu",
                    ],
                },
                ScoreRange {
                    min: 50,
                    max: 60,
                    label: "Performante",
                    tone: RangeTone::Success,
                    analysis: "Votre organisation bénéficie d'une gestion des talents mature et performante. Les compétences sont alignées avec la stratégie, les collaborateurs sont engagés et fidélisés.",
                    recommendations: vec![
                        "L'innovation dans les pratiques RH",
                        "Le développement des leaders de demain",
                        "Le positionnement comme employeur de référence",
                    ],
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_carries_five_themes_of_fifteen_questions() {
        let catalog = ThemeCatalog::standard();
        assert_eq!(catalog.themes().len(), 5);
        for theme in catalog.themes() {
            assert_eq!(
                theme.question_count(),
                15,
                "theme '{}' should flatten to 15 questions",
                theme.id
            );
            assert_eq!(theme.categories.len(), 3);
            assert_eq!(theme.ranges.len(), 4);
        }
    }

    #[test]
    fn standard_catalog_passes_validation() {
        ThemeCatalog::standard()
            .validate()
            .expect("embedded catalog is well formed");
    }

    #[test]
    fn every_theme_partitions_its_score_domain() {
        let catalog = ThemeCatalog::standard();
        for theme in catalog.themes() {
            let (min_total, max_total) = theme.score_domain();
            assert_eq!((min_total, max_total), (15, 60));
            for score in min_total..=max_total {
                let matches = theme
                    .ranges
                    .iter()
                    .filter(|range| range.contains(score))
                    .count();
                assert_eq!(matches, 1, "score {score} in theme '{}'", theme.id);
            }
        }
    }

    #[test]
    fn validation_rejects_a_range_gap() {
        let mut catalog = ThemeCatalog::standard();
        catalog.themes[0].ranges.remove(1);
        match catalog.validate() {
            Err(CatalogError::RangeGap { theme, score }) => {
                assert_eq!(theme, ThemeId::ClimatSocial);
                assert_eq!(score, 30);
            }
            other => panic!("expected range gap, got {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_overlapping_ranges() {
        let mut catalog = ThemeCatalog::standard();
        catalog.themes[0].ranges[1].min = 25;
        match catalog.validate() {
            Err(CatalogError::RangeOverlap { theme, score }) => {
                assert_eq!(theme, ThemeId::ClimatSocial);
                assert_eq!(score, 25);
            }
            other => panic!("expected range overlap, got {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_an_empty_theme() {
        let mut catalog = ThemeCatalog::standard();
        catalog.themes[2].categories.clear();
        match catalog.validate() {
            Err(CatalogError::EmptyTheme { theme }) => assert_eq!(theme, ThemeId::Performance),
            other => panic!("expected empty theme error, got {other:?}"),
        }
    }

    #[test]
    fn answer_scale_spans_one_to_four() {
        let options = answer_options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, 1);
        assert_eq!(options[0].label, "Pas du tout d'accord");
        assert_eq!(options[3].value, 4);
        assert_eq!(options[3].label, "Tout à fait d'accord");
    }
}
