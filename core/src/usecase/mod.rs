pub mod weekly_agenda;
