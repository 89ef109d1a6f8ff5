//! Sample data generation for development databases.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::json;
use tracing::info;

use super::{CategoryService, PostService};
use crate::domain::entities::{Author, NewAuthor, NewPost, PostStatus};
use crate::domain::repositories::{AuthorRepository, CategoryRepository, PostRepository};
use crate::error::AppError;

const CATEGORY_NAMES: [&str; 10] = [
    "Tecnología",
    "Programación",
    "Django",
    "Python",
    "JavaScript",
    "Web Development",
    "Mobile Apps",
    "DevOps",
    "Cloud Computing",
    "AI & Machine Learning",
];

const AUTHORS: [(&str, &str); 5] = [
    ("María García", "maria@example.com"),
    ("Juan Pérez", "juan@example.com"),
    ("Ana López", "ana@example.com"),
    ("Carlos Rodríguez", "carlos@example.com"),
    ("Laura Martínez", "laura@example.com"),
];

const SAMPLE_POSTS: [(&str, &str); 10] = [
    (
        "Introducción a Django REST Framework",
        "Django REST Framework es una poderosa herramienta para construir APIs RESTful con Django. En este artículo exploramos los conceptos básicos y cómo comenzar.",
    ),
    (
        "Optimizando consultas con select_related y prefetch_related",
        "Cuando trabajas con modelos relacionados en Django, es importante optimizar tus consultas para evitar el problema N+1. Aprende cómo usar select_related y prefetch_related.",
    ),
    (
        "Implementando caché con Redis en Django",
        "Redis es una herramienta excelente para mejorar el rendimiento de tu aplicación Django. Descubre cómo implementar caché efectiva con django-redis.",
    ),
    (
        "Autenticación JWT en aplicaciones modernas",
        "Los tokens JWT son una forma segura y escalable de manejar autenticación en aplicaciones web modernas. Te mostramos cómo implementarlos correctamente.",
    ),
    (
        "Desarrollo con Docker: Guía completa",
        "Docker revolucionó el desarrollo de software. Aprende cómo containerizar tus aplicaciones Django y desplegar fácilmente en cualquier ambiente.",
    ),
    (
        "Python vs JavaScript: ¿Cuál elegir?",
        "Ambos lenguajes son poderosos pero diferentes. Analizamos las fortalezas de cada uno y cuándo usar cada uno según tu proyecto.",
    ),
    (
        "Microservicios: Arquitectura moderna",
        "Los microservicios ofrecen escalabilidad y mantenibilidad. Explora los patrones de diseño y mejores prácticas para implementar esta arquitectura.",
    ),
    (
        "Testing en Django: TDD práctico",
        "El Test-Driven Development te ayuda a escribir código más robusto. Aprende a escribir tests efectivos para tus aplicaciones Django.",
    ),
    (
        "Construyendo APIs RESTful con Python",
        "APIs RESTful son la base de aplicaciones modernas. Conoce los principios y mejores prácticas para diseñar APIs escalables y mantenibles.",
    ),
    (
        "Manejo de errores y logging en producción",
        "Un buen sistema de logging es crucial para mantener aplicaciones en producción. Aprende a implementar logging estructurado en Django.",
    ),
];

const PUBLISHED_PROBABILITY: f64 = 0.8;
const MAX_DAYS_AGO: i64 = 60;
const MAX_VIEWS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    pub categories: usize,
    pub authors: usize,
    pub posts: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            categories: 5,
            authors: 3,
            posts: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub authors: usize,
    pub posts_created: usize,
    /// Published posts in the whole table, not only this run.
    pub published: i64,
    pub drafts: i64,
}

/// Populates categories, authors and posts with sample content.
///
/// Categories and authors are get-or-create, so re-running only adds posts.
pub struct SeedService<C, A, P>
where
    C: CategoryRepository + ?Sized,
    A: AuthorRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    categories: CategoryService<C>,
    authors: Arc<A>,
    posts: PostService<P>,
}

impl<C, A, P> SeedService<C, A, P>
where
    C: CategoryRepository + ?Sized,
    A: AuthorRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub fn new(categories: Arc<C>, authors: Arc<A>, posts: Arc<P>) -> Self {
        Self {
            categories: CategoryService::new(categories),
            authors,
            posts: PostService::new(posts),
        }
    }

    /// Runs the seed. `now` anchors every generated date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when posts are requested without any
    /// category or author to attach them to.
    pub async fn run<G: Rng>(
        &self,
        options: SeedOptions,
        rng: &mut G,
        now: DateTime<Utc>,
    ) -> Result<SeedSummary, AppError> {
        let mut categories = Vec::with_capacity(options.categories);
        for i in 0..options.categories {
            let name = CATEGORY_NAMES[i % CATEGORY_NAMES.len()];
            let (category, _) = self.categories.get_or_create(name).await?;
            categories.push(category);
        }
        info!(count = categories.len(), "Created/Retrieved categories");

        let mut authors = Vec::new();
        for (display_name, email) in AUTHORS.iter().take(options.authors) {
            authors.push(self.author_get_or_create(display_name, email).await?);
        }
        info!(count = authors.len(), "Created/Retrieved authors");

        if options.posts > 0 && (categories.is_empty() || authors.is_empty()) {
            return Err(AppError::bad_request(
                "Posts need at least one category and one author",
                json!({ "categories": categories.len(), "authors": authors.len() }),
            ));
        }

        let mut posts_created = 0;
        for i in 0..options.posts {
            let (Some(author), Some(category)) = (authors.choose(rng), categories.choose(rng))
            else {
                break;
            };

            let (title, body) = match SAMPLE_POSTS.get(i) {
                Some((title, body)) => (title.to_string(), body.to_string()),
                None => (
                    format!("Post de ejemplo #{}", i + 1),
                    format!(
                        "Contenido del post #{}. Este es un post de prueba con contenido generado automáticamente para poblar la base de datos del blog.",
                        i + 1
                    ),
                ),
            };

            let mut new = NewPost::draft(title, body, author.id);
            new.category_id = Some(category.id);

            if rng.random_bool(PUBLISHED_PROBABILITY) {
                new.status = PostStatus::Published;
                new.published_at = Some(now - Duration::days(rng.random_range(0..=MAX_DAYS_AGO)));
                new.views = rng.random_range(0..=MAX_VIEWS);
            }

            self.posts.create(new, now).await?;
            posts_created += 1;
        }
        info!(count = posts_created, "Created posts");

        Ok(SeedSummary {
            categories: categories.len(),
            authors: authors.len(),
            posts_created,
            published: self.posts.count_by_status(PostStatus::Published).await?,
            drafts: self.posts.count_by_status(PostStatus::Draft).await?,
        })
    }

    async fn author_get_or_create(
        &self,
        display_name: &str,
        email: &str,
    ) -> Result<Author, AppError> {
        if let Some(existing) = self.authors.find_by_email(email).await? {
            return Ok(existing);
        }

        self.authors
            .create(NewAuthor {
                display_name: display_name.to_string(),
                email: email.to_string(),
            })
            .await
    }
}
